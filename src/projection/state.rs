//! Working state carried from one projected year to the next

use serde::{Deserialize, Serialize};

use crate::assumptions::ProjectionParameters;

/// Savings phase for a given age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Before retirement: contributions are added and the balance grows
    Accumulation,
    /// At or after retirement: the income shortfall is withdrawn
    Decumulation,
}

impl Phase {
    /// Phase in effect at `age`
    pub fn at_age(age: u32, retirement_age: u32) -> Self {
        if age < retirement_age {
            Phase::Accumulation
        } else {
            Phase::Decumulation
        }
    }

    pub fn is_retired(&self) -> bool {
        matches!(self, Phase::Decumulation)
    }
}

/// State of the savings balance at the start of a projected year
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Age being projected
    pub age: u32,

    /// Years since the first projected age
    pub years_elapsed: u32,

    /// Phase for `age`
    pub phase: Phase,

    /// Savings balance carried into this year
    pub balance: f64,
}

impl ProjectionState {
    /// Initialize state at the first projected age
    pub fn from_parameters(params: &ProjectionParameters) -> Self {
        Self {
            age: params.current_age,
            years_elapsed: 0,
            phase: Phase::at_age(params.current_age, params.retirement_age),
            balance: params.initial_savings,
        }
    }

    /// Move to the next age, keeping the balance
    pub fn advance_year(&mut self, retirement_age: u32) {
        self.age += 1;
        self.years_elapsed += 1;
        self.phase = Phase::at_age(self.age, retirement_age);
    }

    /// Add the contribution, then grow the whole balance for the year
    pub fn accumulate(&mut self, contribution: f64, return_rate: f64) {
        self.balance = (self.balance + contribution) * (1.0 + return_rate);
    }

    /// Withdraw, then grow what remains; the balance never goes below zero
    pub fn decumulate(&mut self, withdrawal: f64, return_rate: f64) {
        let remaining = (self.balance - withdrawal).max(0.0);
        self.balance = (remaining * (1.0 + return_rate)).max(0.0);
    }
}
