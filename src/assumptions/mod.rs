//! Projection assumptions: economic parameters and summary thresholds

mod parameters;
mod thresholds;
pub mod loader;

pub use parameters::ProjectionParameters;
pub use thresholds::{SummaryConfig, DESIRED_INCOME_REPLACEMENT_RATIO};
pub use loader::{load_assumptions, load_assumptions_from_str, DEFAULT_PARAMETERS_PATH};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for everything a projection run needs besides the income roster
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assumptions {
    #[serde(default)]
    pub parameters: ProjectionParameters,
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl Assumptions {
    /// Defaults matching the retirement calculator form
    pub fn calculator_defaults() -> Self {
        Self::default()
    }

    /// Load from the default location (data/parameters.json)
    pub fn from_json() -> Result<Self, crate::InputError> {
        Self::from_json_path(Path::new(DEFAULT_PARAMETERS_PATH))
    }

    /// Load from a specific file
    pub fn from_json_path(path: &Path) -> Result<Self, crate::InputError> {
        load_assumptions(path)
    }
}
