//! Core projection engine for yearly savings and income projections

use crate::assumptions::{ProjectionParameters, DESIRED_INCOME_REPLACEMENT_RATIO};
use crate::income::{compound_factor, total_income_at, IncomeSource};
use super::state::{Phase, ProjectionState};
use super::cashflows::{ProjectionRow, ProjectionResult};

/// Main projection engine
///
/// Holds only the run parameters. Each call to [`ProjectionEngine::project`] builds
/// its own state and result, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ProjectionParameters,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given parameters
    pub fn new(params: ProjectionParameters) -> Self {
        Self { params }
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.params
    }

    /// Run the projection from `current_age` to `max_age` inclusive
    ///
    /// An inverted age window yields an empty result rather than an error.
    pub fn project(&self, sources: &[IncomeSource]) -> ProjectionResult {
        let params = &self.params;
        let mut result = ProjectionResult::new(params.current_age);

        if params.max_age < params.current_age {
            log::warn!(
                "max age {} is below current age {}, nothing to project",
                params.max_age,
                params.current_age
            );
            return result;
        }

        let mut state = ProjectionState::from_parameters(params);
        result.rows.reserve(params.projection_years());

        loop {
            let row = self.calculate_year(sources, &mut state);
            result.add_row(row);

            if state.age >= params.max_age {
                break;
            }
            state.advance_year(params.retirement_age);
        }

        log::debug!(
            "projected {} years over {} income sources, final balance {:.2}",
            result.len(),
            sources.len(),
            result.final_balance()
        );

        result
    }

    /// Calculate income, target and balance for a single year
    fn calculate_year(&self, sources: &[IncomeSource], state: &mut ProjectionState) -> ProjectionRow {
        let params = &self.params;
        let mut row = ProjectionRow::new(state.age, state.phase);

        row.total_income = total_income_at(state.age, sources);

        // Same inflation adjustment in both phases
        let inflation_factor = compound_factor(params.inflation_rate, state.years_elapsed);
        row.desired_income = row.total_income * DESIRED_INCOME_REPLACEMENT_RATIO * inflation_factor;

        match state.phase {
            Phase::Accumulation => {
                row.contribution = params.annual_contribution;
                state.accumulate(params.annual_contribution, params.return_rate_before_retirement);
            }
            Phase::Decumulation => {
                row.withdrawal = (row.desired_income - row.total_income).max(0.0);
                state.decumulate(row.withdrawal, params.return_rate_after_retirement);
            }
        }

        row.savings_balance = state.balance;
        row
    }
}

/// Run a single projection without keeping an engine around
pub fn project(params: &ProjectionParameters, sources: &[IncomeSource]) -> ProjectionResult {
    ProjectionEngine::new(params.clone()).project(sources)
}
