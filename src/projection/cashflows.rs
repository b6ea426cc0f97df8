//! Per-age output rows and the projection result series

use serde::{Deserialize, Serialize};

use super::state::Phase;
use super::summary::ProjectionSummary;
use crate::assumptions::SummaryConfig;
use crate::income::IncomeSource;

/// One projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub age: u32,
    pub phase: Phase,

    /// Sum of all active income sources at this age
    pub total_income: f64,

    /// Inflation-adjusted retirement income target
    pub desired_income: f64,

    /// Contribution added this year (accumulation only)
    pub contribution: f64,

    /// Shortfall withdrawn this year (decumulation only)
    pub withdrawal: f64,

    /// Balance at the end of the year
    pub savings_balance: f64,
}

impl ProjectionRow {
    pub fn new(age: u32, phase: Phase) -> Self {
        Self {
            age,
            phase,
            total_income: 0.0,
            desired_income: 0.0,
            contribution: 0.0,
            withdrawal: 0.0,
            savings_balance: 0.0,
        }
    }
}

/// Complete projection result
///
/// Rows are stored per age, so the income, desired income and balance series
/// always have the same length and share the age index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Age of the first row
    pub start_age: u32,

    /// One row per age, strictly increasing by one
    pub rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub fn new(start_age: u32) -> Self {
        Self {
            start_age,
            rows: Vec::new(),
        }
    }

    /// Append the next year's row
    pub fn add_row(&mut self, row: ProjectionRow) {
        debug_assert_eq!(row.age, self.start_age + self.rows.len() as u32);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ages(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.age).collect()
    }

    pub fn total_income(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.total_income).collect()
    }

    pub fn desired_income(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.desired_income).collect()
    }

    pub fn savings_balance(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.savings_balance).collect()
    }

    /// Row for a given age, if projected
    pub fn row_at(&self, age: u32) -> Option<&ProjectionRow> {
        let index = age.checked_sub(self.start_age)? as usize;
        self.rows.get(index)
    }

    /// Balance at the last projected age (0 for an empty result)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.savings_balance).unwrap_or(0.0)
    }

    /// First age in the decumulation phase, if reached
    pub fn retirement_start(&self) -> Option<u32> {
        self.rows.iter().find(|r| r.phase.is_retired()).map(|r| r.age)
    }

    /// Headline statistics for this result
    pub fn summary(&self, sources: &[IncomeSource], config: &SummaryConfig) -> ProjectionSummary {
        ProjectionSummary::from_result(self, sources, config)
    }

    /// Write one CSV row per age
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ProjectionResult {
        let mut result = ProjectionResult::new(64);
        for (age, balance) in [(64, 1_000.0), (65, 800.0), (66, 500.0)] {
            let mut row = ProjectionRow::new(age, Phase::at_age(age, 65));
            row.savings_balance = balance;
            result.add_row(row);
        }
        result
    }

    #[test]
    fn test_series_accessors_align() {
        let result = sample_result();

        assert_eq!(result.ages(), vec![64, 65, 66]);
        assert_eq!(result.savings_balance(), vec![1_000.0, 800.0, 500.0]);
        assert_eq!(result.total_income().len(), result.len());
        assert_eq!(result.desired_income().len(), result.len());
    }

    #[test]
    fn test_row_lookup_by_age() {
        let result = sample_result();

        assert_eq!(result.row_at(65).map(|r| r.savings_balance), Some(800.0));
        assert!(result.row_at(63).is_none());
        assert!(result.row_at(67).is_none());
        assert_eq!(result.retirement_start(), Some(65));
        assert_eq!(result.final_balance(), 500.0);
    }

    #[test]
    fn test_empty_result() {
        let result = ProjectionResult::new(30);

        assert!(result.is_empty());
        assert_eq!(result.final_balance(), 0.0);
        assert_eq!(result.retirement_start(), None);
    }

    #[test]
    fn test_write_csv() {
        let result = sample_result();
        let mut buffer = Vec::new();

        result.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "age,phase,total_income,desired_income,contribution,withdrawal,savings_balance"
        );
        assert!(lines[2].starts_with("65,Decumulation,"));
    }
}
