//! Thresholds used when summarising a projection

use serde::{Deserialize, Serialize};

/// Fraction of current income targeted in retirement
///
/// Applied to total income (not a separate desired-income input) in every year.
pub const DESIRED_INCOME_REPLACEMENT_RATIO: f64 = 0.8;

fn default_income_drop_ratio() -> f64 { 0.5 }
fn default_income_drop_fallback_age() -> u32 { 65 }
fn default_sufficiency_threshold() -> f64 { 100_000.0 }
fn default_consumed_income_ratio() -> f64 { 0.9 }

/// Configurable constants for the summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Income falling below this fraction of the prior year counts as a drop
    #[serde(default = "default_income_drop_ratio")]
    pub income_drop_ratio: f64,

    /// Reported drop age when no drop occurs in range
    #[serde(default = "default_income_drop_fallback_age")]
    pub income_drop_fallback_age: u32,

    /// Final balance must exceed this to be on track
    #[serde(default = "default_sufficiency_threshold")]
    pub sufficiency_threshold: f64,

    /// Share of starting income assumed to be spent
    #[serde(default = "default_consumed_income_ratio")]
    pub consumed_income_ratio: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            income_drop_ratio: default_income_drop_ratio(),
            income_drop_fallback_age: default_income_drop_fallback_age(),
            sufficiency_threshold: default_sufficiency_threshold(),
            consumed_income_ratio: default_consumed_income_ratio(),
        }
    }
}
