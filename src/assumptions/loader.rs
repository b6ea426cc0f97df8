//! JSON-based assumption loader
//!
//! Reads projection parameters and summary thresholds from data/parameters.json.
//! Every field is optional; anything missing falls back to the calculator defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Assumptions;
use crate::error::InputError;

/// Default path to the parameters file
pub const DEFAULT_PARAMETERS_PATH: &str = "data/parameters.json";

/// Load assumptions from a JSON file
pub fn load_assumptions(path: &Path) -> Result<Assumptions, InputError> {
    log::debug!("loading assumptions from {}", path.display());
    let file = File::open(path)?;
    let assumptions: Assumptions = serde_json::from_reader(BufReader::new(file))?;
    Ok(assumptions)
}

/// Load assumptions from a JSON string
pub fn load_assumptions_from_str(json: &str) -> Result<Assumptions, InputError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document() {
        let json = r#"{
            "parameters": { "retirement_age": 62, "annual_contribution": 6000 },
            "summary": { "sufficiency_threshold": 250000 }
        }"#;

        let assumptions = load_assumptions_from_str(json).expect("document should parse");

        assert_eq!(assumptions.parameters.retirement_age, 62);
        assert_eq!(assumptions.parameters.annual_contribution, 6000.0);
        assert_eq!(assumptions.parameters.current_age, 25);
        assert_eq!(assumptions.summary.sufficiency_threshold, 250_000.0);
        assert_eq!(assumptions.summary.income_drop_ratio, 0.5);
    }

    #[test]
    fn test_empty_document_is_defaults() {
        let assumptions = load_assumptions_from_str("{}").unwrap();
        assert_eq!(assumptions, Assumptions::calculator_defaults());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_assumptions(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = load_assumptions_from_str("{ parameters: ").unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }
}
