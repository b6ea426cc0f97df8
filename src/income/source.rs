//! Income source records and per-age income aggregation

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// `(1 + rate)^years`, exact for any `u32` span
pub fn compound_factor(rate: f64, years: u32) -> f64 {
    match i32::try_from(years) {
        Ok(years) => (1.0 + rate).powi(years),
        Err(_) => (1.0 + rate).powf(f64::from(years)),
    }
}

/// A single time-windowed, growing income stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Nominal amount paid at `start_age`
    pub amount: f64,

    /// Fractional annual growth, compounded from `start_age`
    pub growth_rate: f64,

    /// First age at which the source pays (inclusive)
    pub start_age: u32,

    /// Last age at which the source pays (inclusive)
    pub stop_age: u32,
}

impl IncomeSource {
    pub fn new(amount: f64, growth_rate: f64, start_age: u32, stop_age: u32) -> Self {
        Self {
            amount,
            growth_rate,
            start_age,
            stop_age,
        }
    }

    /// Whether the source pays at `age`
    ///
    /// A source with `stop_age < start_age` is never active.
    pub fn is_active_at(&self, age: u32) -> bool {
        self.start_age <= age && age <= self.stop_age
    }

    /// Income paid at `age`, or 0 outside the active window
    pub fn income_at(&self, age: u32) -> f64 {
        if !self.is_active_at(age) {
            return 0.0;
        }
        self.amount * compound_factor(self.growth_rate, age - self.start_age)
    }

    /// Reject sources the aggregator should never see
    pub fn validate(&self, index: usize) -> Result<(), InputError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(InputError::InvalidIncomeSource {
                index,
                reason: format!("amount must be a nonnegative number, got {}", self.amount),
            });
        }
        if !self.growth_rate.is_finite() {
            return Err(InputError::InvalidIncomeSource {
                index,
                reason: format!("growth rate must be finite, got {}", self.growth_rate),
            });
        }
        Ok(())
    }
}

/// Total income across all sources active at `age`
///
/// Each source compounds from its own start age. No validation is done here.
pub fn total_income_at(age: u32, sources: &[IncomeSource]) -> f64 {
    sources.iter().map(|source| source.income_at(age)).sum()
}

/// Sum of every source's undiscounted starting amount
pub fn starting_income(sources: &[IncomeSource]) -> f64 {
    sources.iter().map(|source| source.amount).sum()
}

/// Validate a full roster, reporting the first bad source
pub fn validate_sources(sources: &[IncomeSource]) -> Result<(), InputError> {
    sources
        .iter()
        .enumerate()
        .try_for_each(|(index, source)| source.validate(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_year_window() {
        let source = IncomeSource::new(1000.0, 0.05, 30, 30);

        assert_eq!(total_income_at(30, &[source]), 1000.0);
        assert_eq!(total_income_at(31, &[source]), 0.0);
        assert_eq!(total_income_at(29, &[source]), 0.0);
    }

    #[test]
    fn test_growth_compounds_from_own_start_age() {
        let early = IncomeSource::new(1000.0, 0.10, 30, 60);
        let late = IncomeSource::new(1000.0, 0.10, 40, 60);

        // At 42 the early source has 12 years of growth, the late one 2
        let total = total_income_at(42, &[early, late]);
        assert_relative_eq!(total, 1000.0 * 1.1f64.powi(12) + 1000.0 * 1.1f64.powi(2), max_relative = 1e-12);
    }

    #[test]
    fn test_inverted_window_never_contributes() {
        let source = IncomeSource::new(5000.0, 0.0, 65, 60);

        for age in 50..80 {
            assert_eq!(source.income_at(age), 0.0);
        }
    }

    #[test]
    fn test_negative_growth() {
        let source = IncomeSource::new(10_000.0, -0.5, 20, 25);

        assert_relative_eq!(source.income_at(22), 2500.0);
    }

    #[test]
    fn test_span_beyond_i32_range_keeps_compounding() {
        let source = IncomeSource::new(1000.0, -0.5, 0, u32::MAX);

        // 0.5 raised to ~4.3 billion underflows to zero rather than wrapping
        assert_eq!(source.income_at(u32::MAX), 0.0);
        assert_eq!(compound_factor(0.0, u32::MAX), 1.0);
        assert_relative_eq!(compound_factor(0.1, 3), 1.331, max_relative = 1e-12);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = IncomeSource::new(40_000.0, 0.03, 25, 64);
        let b = IncomeSource::new(12_000.0, 0.02, 67, 90);
        let c = IncomeSource::new(3_000.0, 0.0, 30, 50);

        for age in 20..95 {
            assert_relative_eq!(
                total_income_at(age, &[a, b, c]),
                total_income_at(age, &[c, a, b]),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(total_income_at(40, &[]), 0.0);
        assert_eq!(starting_income(&[]), 0.0);
    }

    #[test]
    fn test_starting_income_ignores_growth() {
        let sources = [
            IncomeSource::new(50_000.0, 0.03, 25, 64),
            IncomeSource::new(20_000.0, 0.02, 67, 90),
        ];

        assert_eq!(starting_income(&sources), 70_000.0);
    }

    #[test]
    fn test_validate_rejects_bad_sources() {
        let sources = [
            IncomeSource::new(1000.0, 0.0, 25, 30),
            IncomeSource::new(-1.0, 0.0, 25, 30),
        ];

        match validate_sources(&sources) {
            Err(InputError::InvalidIncomeSource { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected invalid source error, got {:?}", other),
        }

        assert!(IncomeSource::new(1000.0, f64::NAN, 25, 30).validate(0).is_err());
        assert!(IncomeSource::new(f64::INFINITY, 0.0, 25, 30).validate(0).is_err());
        assert!(IncomeSource::new(0.0, -0.2, 25, 30).validate(0).is_ok());
    }
}
