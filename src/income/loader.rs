//! Load income rosters from CSV
//!
//! Expected columns: `Amount,AnnualIncreasePct,StartAge,StopAge`.
//! The annual increase is a percentage (3 means 3%).

use super::IncomeSource;
use crate::error::InputError;
use csv::Reader;
use std::path::Path;

/// Default roster location
pub const DEFAULT_INCOME_PATH: &str = "data/income_sources.csv";

/// Raw CSV row matching the roster columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "AnnualIncreasePct")]
    annual_increase_pct: f64,
    #[serde(rename = "StartAge")]
    start_age: u32,
    #[serde(rename = "StopAge")]
    stop_age: u32,
}

impl CsvRow {
    fn into_source(self) -> IncomeSource {
        IncomeSource {
            amount: self.amount,
            growth_rate: self.annual_increase_pct / 100.0,
            start_age: self.start_age,
            stop_age: self.stop_age,
        }
    }
}

/// Load an income roster from a CSV file
pub fn load_income_sources<P: AsRef<Path>>(path: P) -> Result<Vec<IncomeSource>, InputError> {
    let path = path.as_ref();
    log::debug!("loading income sources from {}", path.display());
    let reader = Reader::from_path(path)?;
    collect_sources(reader)
}

/// Load an income roster from any reader (e.g., string buffer, request body)
pub fn load_income_sources_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<IncomeSource>, InputError> {
    collect_sources(Reader::from_reader(reader))
}

/// Load the roster from the default location
pub fn load_default_income() -> Result<Vec<IncomeSource>, InputError> {
    load_income_sources(DEFAULT_INCOME_PATH)
}

fn collect_sources<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<IncomeSource>, InputError> {
    let mut sources = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let source = row.into_source();
        source.validate(index)?;

        // Zero-amount rows are placeholders in the roster, not sources
        if source.amount > 0.0 {
            sources.push(source);
        } else {
            log::debug!("skipping zero-amount income row {}", index);
        }
    }

    log::debug!("loaded {} income sources", sources.len());
    Ok(sources)
}
