//! Scenario runner for batch projections
//!
//! Holds one set of assumptions and runs many independent projections against it.
//! Every projection owns its own state, so batches run in parallel with rayon.

use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::{Assumptions, ProjectionParameters};
use crate::income::IncomeSource;
use crate::projection::{ProjectionEngine, ProjectionResult, ProjectionSummary};

/// Summary of one point in a retirement-age sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub retirement_age: u32,
    pub summary: ProjectionSummary,
}

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_json()?;
///
/// for point in runner.retirement_age_sweep(&sources, 55..=70) {
///     println!("{} {:.0}", point.retirement_age, point.summary.final_balance);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the calculator defaults
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::calculator_defaults(),
        }
    }

    /// Create runner by loading assumptions from data/parameters.json
    pub fn from_json() -> Result<Self, crate::InputError> {
        Ok(Self {
            base_assumptions: Assumptions::from_json()?,
        })
    }

    /// Create runner from a specific parameters file
    pub fn from_json_path(path: &std::path::Path) -> Result<Self, crate::InputError> {
        Ok(Self {
            base_assumptions: Assumptions::from_json_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection with the base parameters
    pub fn run(&self, sources: &[IncomeSource]) -> ProjectionResult {
        ProjectionEngine::new(self.base_assumptions.parameters.clone()).project(sources)
    }

    /// Run the base parameters against several income rosters
    pub fn run_batch(&self, rosters: &[Vec<IncomeSource>]) -> Vec<ProjectionResult> {
        log::info!("running {} rosters", rosters.len());
        let engine = ProjectionEngine::new(self.base_assumptions.parameters.clone());
        rosters.par_iter().map(|sources| engine.project(sources)).collect()
    }

    /// Run several parameter variants against one roster
    pub fn run_scenarios(
        &self,
        sources: &[IncomeSource],
        scenarios: &[ProjectionParameters],
    ) -> Vec<ProjectionResult> {
        log::info!("running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|params| ProjectionEngine::new(params.clone()).project(sources))
            .collect()
    }

    /// Summarise the base projection for each retirement age in `ages`
    pub fn retirement_age_sweep<I>(&self, sources: &[IncomeSource], ages: I) -> Vec<SweepPoint>
    where
        I: IntoIterator<Item = u32>,
    {
        let base = &self.base_assumptions.parameters;
        let scenarios: Vec<ProjectionParameters> =
            ages.into_iter().map(|age| base.with_retirement_age(age)).collect();

        self.run_scenarios(sources, &scenarios)
            .into_iter()
            .zip(&scenarios)
            .map(|(result, params)| SweepPoint {
                retirement_age: params.retirement_age,
                summary: result.summary(sources, &self.base_assumptions.summary),
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
