//! Request/response handling for hosted projections
//!
//! Each request is parsed, validated and projected independently; nothing is
//! shared between requests.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::{ProjectionParameters, SummaryConfig};
use crate::error::InputError;
use crate::income::{validate_sources, IncomeSource};
use crate::projection::{ProjectionEngine, ProjectionRow, ProjectionSummary};

fn default_include_rows() -> bool { true }

/// Income source as submitted by a client
///
/// `annual_increase_pct` is a percentage, matching the calculator form.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeSourceInput {
    pub amount: f64,
    #[serde(default)]
    pub annual_increase_pct: f64,
    pub start_age: u32,
    pub stop_age: u32,
}

impl From<&IncomeSourceInput> for IncomeSource {
    fn from(input: &IncomeSourceInput) -> Self {
        IncomeSource::new(
            input.amount,
            input.annual_increase_pct / 100.0,
            input.start_age,
            input.stop_age,
        )
    }
}

/// Input for one projection request
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    #[serde(default)]
    pub parameters: ProjectionParameters,

    #[serde(default)]
    pub income_sources: Vec<IncomeSourceInput>,

    #[serde(default)]
    pub summary: SummaryConfig,

    /// Whether to return the per-age rows (default: true)
    #[serde(default = "default_include_rows")]
    pub include_rows: bool,
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub summary: ProjectionSummary,
    pub headline: &'static str,
    pub message: &'static str,
    pub income_source_count: usize,
    pub years: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ProjectionRow>>,
    pub execution_time_ms: u64,
}

impl ProjectionRequest {
    /// Validate and convert the submitted income sources
    ///
    /// Sources with a zero amount are dropped, as the calculator form does.
    pub fn income_sources(&self) -> Result<Vec<IncomeSource>, InputError> {
        let sources: Vec<IncomeSource> = self.income_sources.iter().map(IncomeSource::from).collect();
        validate_sources(&sources)?;
        Ok(sources.into_iter().filter(|s| s.amount > 0.0).collect())
    }
}

/// Run a parsed request
pub fn run_request(request: &ProjectionRequest) -> Result<ProjectionResponse, InputError> {
    let start = Instant::now();

    request.parameters.validate()?;
    let sources = request.income_sources()?;

    let result = ProjectionEngine::new(request.parameters.clone()).project(&sources);
    let summary = result.summary(&sources, &request.summary);

    Ok(ProjectionResponse {
        headline: summary.outcome.headline(),
        message: summary.outcome.message(),
        summary,
        income_source_count: sources.len(),
        years: result.len(),
        rows: request.include_rows.then_some(result.rows),
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Parse a JSON request body and run it
pub fn handle_request(body: &str) -> Result<ProjectionResponse, InputError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let request: ProjectionRequest = serde_json::from_str(body)?;
    run_request(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Outcome;

    #[test]
    fn test_empty_body_uses_defaults() {
        let response = handle_request("").expect("defaults should project");

        assert_eq!(response.years, 66);
        assert_eq!(response.income_source_count, 0);
        assert_eq!(response.summary.starting_income, 0.0);
        assert_eq!(response.summary.age_income_drops, 65);
        assert_eq!(response.summary.outcome, Outcome::OutOfBalance);
        assert_eq!(response.rows.as_ref().map(Vec::len), Some(66));
    }

    #[test]
    fn test_full_request() {
        let body = r#"{
            "parameters": {
                "current_age": 30,
                "max_age": 95,
                "retirement_age": 65,
                "initial_savings": 50000,
                "annual_contribution": 12000
            },
            "income_sources": [
                { "amount": 70000, "annual_increase_pct": 3, "start_age": 30, "stop_age": 64 },
                { "amount": 0, "annual_increase_pct": 3, "start_age": 30, "stop_age": 65 }
            ],
            "include_rows": false
        }"#;

        let response = handle_request(body).expect("request should project");

        assert_eq!(response.income_source_count, 1);
        assert_eq!(response.years, 66);
        assert_eq!(response.summary.starting_income, 70_000.0);
        assert_eq!(response.summary.age_income_drops, 65);
        assert!(response.rows.is_none());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let inverted = r#"{ "parameters": { "current_age": 80, "max_age": 70 } }"#;
        assert!(matches!(handle_request(inverted), Err(InputError::InvalidAgeRange { .. })));

        let negative = r#"{ "income_sources": [ { "amount": -5, "start_age": 30, "stop_age": 40 } ] }"#;
        assert!(matches!(handle_request(negative), Err(InputError::InvalidIncomeSource { .. })));

        assert!(matches!(handle_request("not json"), Err(InputError::Json(_))));
    }

    #[test]
    fn test_balance_breaking_parameters_are_rejected() {
        let negative_contribution = r#"{
            "parameters": { "annual_contribution": -1000, "return_rate_before_retirement": 0.05 }
        }"#;
        assert!(matches!(
            handle_request(negative_contribution),
            Err(InputError::InvalidParameter { name: "annual_contribution", .. })
        ));

        let total_loss = r#"{
            "parameters": { "initial_savings": 1000, "return_rate_before_retirement": -1.5 }
        }"#;
        assert!(matches!(
            handle_request(total_loss),
            Err(InputError::InvalidParameter { name: "return_rate_before_retirement", .. })
        ));
    }

    #[test]
    fn test_response_serializes() {
        let response = handle_request(r#"{ "include_rows": false }"#).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["headline"], "Yikes!");
        assert!(json.get("rows").is_none());
        assert_eq!(json["summary"]["outcome"], "OutOfBalance");
    }
}
