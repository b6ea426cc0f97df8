//! Projection engine for yearly savings and income projections

mod state;
mod engine;
mod cashflows;
mod summary;

pub use state::{Phase, ProjectionState};
pub use engine::{project, ProjectionEngine};
pub use cashflows::{ProjectionRow, ProjectionResult};
pub use summary::{find_income_drop, Outcome, ProjectionSummary};
