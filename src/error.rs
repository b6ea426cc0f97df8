//! Errors raised at the input boundary
//!
//! The projection core is total and never fails. Everything here belongs to the
//! layer that reads, parses and validates inputs before a projection is run.

/// Error type for loading and validating projection inputs
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Underlying file could not be read
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV roster
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON parameters or request
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A scalar parameter is out of its allowed domain
    #[error("invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Projection window is inverted
    #[error("max age {max_age} is below current age {current_age}")]
    InvalidAgeRange { current_age: u32, max_age: u32 },

    /// An income source failed validation
    #[error("income source {index}: {reason}")]
    InvalidIncomeSource { index: usize, reason: String },
}
