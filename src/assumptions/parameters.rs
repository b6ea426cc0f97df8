//! Scalar inputs to a single projection run

use serde::{Deserialize, Serialize};

use crate::error::InputError;

fn default_current_age() -> u32 { 25 }
fn default_max_age() -> u32 { 90 }
fn default_retirement_age() -> u32 { 65 }
fn default_return_before() -> f64 { 0.06 }  // 6%
fn default_return_after() -> f64 { 0.04 }   // 4%
fn default_inflation() -> f64 { 0.02 }      // 2%

/// Parameters for one projection
///
/// Rates are fractional (0.06 = 6%). Missing JSON fields take the calculator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// First projected age
    #[serde(default = "default_current_age")]
    pub current_age: u32,

    /// Last projected age (inclusive)
    #[serde(default = "default_max_age")]
    pub max_age: u32,

    /// First age of the decumulation phase
    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,

    /// Savings balance before the first projected year
    #[serde(default)]
    pub initial_savings: f64,

    /// Amount added each year before retirement
    #[serde(default)]
    pub annual_contribution: f64,

    /// Annual return while accumulating
    #[serde(default = "default_return_before")]
    pub return_rate_before_retirement: f64,

    /// Annual return while withdrawing
    #[serde(default = "default_return_after")]
    pub return_rate_after_retirement: f64,

    /// Annual inflation applied to the desired income target
    #[serde(default = "default_inflation")]
    pub inflation_rate: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            current_age: default_current_age(),
            max_age: default_max_age(),
            retirement_age: default_retirement_age(),
            initial_savings: 0.0,
            annual_contribution: 0.0,
            return_rate_before_retirement: default_return_before(),
            return_rate_after_retirement: default_return_after(),
            inflation_rate: default_inflation(),
        }
    }
}

impl ProjectionParameters {
    /// Number of projected years, 0 when the window is inverted
    pub fn projection_years(&self) -> usize {
        if self.max_age < self.current_age {
            0
        } else {
            (self.max_age - self.current_age + 1) as usize
        }
    }

    /// Same parameters with a different retirement age
    pub fn with_retirement_age(&self, retirement_age: u32) -> Self {
        Self {
            retirement_age,
            ..self.clone()
        }
    }

    /// Reject inputs the engine's contract excludes
    pub fn validate(&self) -> Result<(), InputError> {
        if self.max_age < self.current_age {
            return Err(InputError::InvalidAgeRange {
                current_age: self.current_age,
                max_age: self.max_age,
            });
        }

        let rates = [
            ("initial_savings", self.initial_savings),
            ("annual_contribution", self.annual_contribution),
            ("return_rate_before_retirement", self.return_rate_before_retirement),
            ("return_rate_after_retirement", self.return_rate_after_retirement),
            ("inflation_rate", self.inflation_rate),
        ];
        for (name, value) in rates {
            if !value.is_finite() {
                return Err(InputError::InvalidParameter { name, value });
            }
        }

        // Accumulation has no floor, so these bounds keep the balance nonnegative
        let lower_bounds = [
            ("initial_savings", self.initial_savings, 0.0),
            ("annual_contribution", self.annual_contribution, 0.0),
            ("return_rate_before_retirement", self.return_rate_before_retirement, -1.0),
        ];
        for (name, value, min) in lower_bounds {
            if value < min {
                return Err(InputError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}
