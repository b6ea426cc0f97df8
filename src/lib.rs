//! Retirement Projector - yearly savings and income projection engine
//!
//! This library provides:
//! - Income aggregation over time-windowed, growing income sources
//! - Accumulation / decumulation savings projections with inflation-adjusted targets
//! - Summary statistics (starting income, income-drop age, balance sufficiency)
//! - Parallel scenario batches and a request/response service layer
//! - A control-vs-opportunity comparison table

pub mod error;
pub mod income;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod service;
pub mod opportunity;

// Re-export commonly used types
pub use error::InputError;
pub use income::{IncomeSource, total_income_at};
pub use assumptions::{Assumptions, ProjectionParameters, SummaryConfig};
pub use projection::{project, ProjectionEngine, ProjectionResult, ProjectionRow, ProjectionSummary, Outcome};
pub use scenario::ScenarioRunner;
