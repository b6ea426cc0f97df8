//! Headline statistics derived from a projection

use serde::{Deserialize, Serialize};

use super::cashflows::ProjectionResult;
use crate::assumptions::SummaryConfig;
use crate::income::{starting_income, IncomeSource};

/// Qualitative verdict on the final balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    OnTrack,
    OutOfBalance,
}

impl Outcome {
    /// On track when the final balance strictly exceeds the threshold
    pub fn from_final_balance(final_balance: f64, threshold: f64) -> Self {
        if final_balance > threshold {
            Outcome::OnTrack
        } else {
            Outcome::OutOfBalance
        }
    }

    pub fn is_on_track(&self) -> bool {
        matches!(self, Outcome::OnTrack)
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Outcome::OnTrack => "Great!",
            Outcome::OutOfBalance => "Yikes!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::OnTrack => "You are on track for a comfortable retirement!",
            Outcome::OutOfBalance => "You are out of balance!",
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Sum of every source's starting amount
    pub starting_income: f64,
    /// Portion of starting income assumed spent
    pub consumed_income: f64,
    /// First age at which income falls sharply, or the fallback
    pub age_income_drops: u32,
    pub final_balance: f64,
    pub outcome: Outcome,
}

impl ProjectionSummary {
    pub fn from_result(
        result: &ProjectionResult,
        sources: &[IncomeSource],
        config: &SummaryConfig,
    ) -> Self {
        let starting_income = starting_income(sources);
        let final_balance = result.final_balance();

        Self {
            starting_income,
            consumed_income: starting_income * config.consumed_income_ratio,
            age_income_drops: find_income_drop(result, config.income_drop_ratio)
                .unwrap_or(config.income_drop_fallback_age),
            final_balance,
            outcome: Outcome::from_final_balance(final_balance, config.sufficiency_threshold),
        }
    }
}

/// First age whose income is below `ratio` times the prior year's income
pub fn find_income_drop(result: &ProjectionResult, ratio: f64) -> Option<u32> {
    result
        .rows
        .windows(2)
        .find(|pair| pair[1].total_income < pair[0].total_income * ratio)
        .map(|pair| pair[1].age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Phase, ProjectionRow};

    fn result_with_income(start_age: u32, incomes: &[f64]) -> ProjectionResult {
        let mut result = ProjectionResult::new(start_age);
        for (offset, &income) in incomes.iter().enumerate() {
            let age = start_age + offset as u32;
            let mut row = ProjectionRow::new(age, Phase::Accumulation);
            row.total_income = income;
            result.add_row(row);
        }
        result
    }

    #[test]
    fn test_first_drop_wins() {
        let result = result_with_income(60, &[100.0, 40.0, 10.0, 1.0]);

        assert_eq!(find_income_drop(&result, 0.5), Some(61));
    }

    #[test]
    fn test_exactly_half_is_not_a_drop() {
        let result = result_with_income(60, &[100.0, 50.0, 25.0]);

        assert_eq!(find_income_drop(&result, 0.5), None);
    }

    #[test]
    fn test_zero_income_never_drops() {
        let result = result_with_income(25, &[0.0, 0.0, 0.0]);

        assert_eq!(find_income_drop(&result, 0.5), None);
    }

    #[test]
    fn test_fallback_age_when_no_drop() {
        let result = result_with_income(25, &[100.0, 101.0]);
        let config = SummaryConfig {
            income_drop_fallback_age: 70,
            ..Default::default()
        };

        let summary = ProjectionSummary::from_result(&result, &[], &config);
        assert_eq!(summary.age_income_drops, 70);
    }

    #[test]
    fn test_sufficiency_is_strict() {
        assert_eq!(Outcome::from_final_balance(100_000.0, 100_000.0), Outcome::OutOfBalance);
        assert_eq!(Outcome::from_final_balance(100_000.01, 100_000.0), Outcome::OnTrack);
        assert_eq!(Outcome::OnTrack.headline(), "Great!");
        assert_eq!(Outcome::OutOfBalance.message(), "You are out of balance!");
    }

    #[test]
    fn test_starting_and_consumed_income() {
        let sources = [
            IncomeSource::new(60_000.0, 0.03, 25, 64),
            IncomeSource::new(40_000.0, 0.02, 30, 64),
        ];
        let result = result_with_income(25, &[60_000.0]);

        let summary = ProjectionSummary::from_result(&result, &sources, &SummaryConfig::default());

        assert_eq!(summary.starting_income, 100_000.0);
        assert_eq!(summary.consumed_income, 90_000.0);
    }
}
