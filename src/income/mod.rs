//! Income sources, per-age aggregation and roster loading

mod source;
pub mod loader;

pub use source::{compound_factor, IncomeSource, total_income_at, starting_income, validate_sources};
pub use loader::{load_income_sources, load_income_sources_from_reader, load_default_income};
