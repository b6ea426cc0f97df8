//! Retirement Projector CLI
//!
//! Command-line interface for running savings and income projections

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use retirement_projector::{
    assumptions::DEFAULT_PARAMETERS_PATH,
    income::{load_income_sources, loader::DEFAULT_INCOME_PATH},
    opportunity::{
        build_table, clamp_control_cost, format_return, parse_opportunities, table_to_csv,
        DEFAULT_CONTROL_COST, DEFAULT_OPPORTUNITIES,
    },
    Assumptions, IncomeSource, ProjectionEngine, ScenarioRunner,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "retirement_projector")]
#[command(about = "Retirement savings and income projections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project savings and income age by age
    Project {
        #[command(flatten)]
        inputs: InputArgs,

        /// CSV file for the full projection
        #[arg(short, long, default_value = "projection_output.csv")]
        output: PathBuf,

        /// Rows to print to the console
        #[arg(long, default_value_t = 24)]
        rows: usize,
    },
    /// Compare outcomes across a range of retirement ages
    Sweep {
        #[command(flatten)]
        inputs: InputArgs,

        /// First retirement age
        #[arg(long, default_value_t = 55)]
        from: u32,

        /// Last retirement age (inclusive)
        #[arg(long, default_value_t = 70)]
        to: u32,
    },
    /// Compare opportunity returns against a control cost
    Opportunities {
        /// Control cost in percent (clamped to 0-20)
        #[arg(short, long, default_value_t = DEFAULT_CONTROL_COST)]
        control: f64,

        /// Comma-separated opportunity returns in percent
        #[arg(long)]
        opportunities: Option<String>,

        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
}

/// Inputs shared by the projection commands
#[derive(Args)]
struct InputArgs {
    /// Parameters file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Income roster (CSV: Amount,AnnualIncreasePct,StartAge,StopAge)
    #[arg(long)]
    income: Option<PathBuf>,

    #[arg(long)]
    current_age: Option<u32>,

    #[arg(long)]
    max_age: Option<u32>,

    #[arg(long)]
    retirement_age: Option<u32>,

    #[arg(long)]
    initial_savings: Option<f64>,

    #[arg(long)]
    annual_contribution: Option<f64>,

    /// Annual return before retirement (fraction, 0.06 = 6%)
    #[arg(long)]
    return_before: Option<f64>,

    /// Annual return after retirement (fraction)
    #[arg(long)]
    return_after: Option<f64>,

    /// Annual inflation (fraction)
    #[arg(long)]
    inflation: Option<f64>,
}

impl InputArgs {
    /// Load assumptions, apply flag overrides and validate
    fn assumptions(&self) -> Result<Assumptions> {
        let mut assumptions = match &self.config {
            Some(path) => Assumptions::from_json_path(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None if Path::new(DEFAULT_PARAMETERS_PATH).exists() => Assumptions::from_json()
                .with_context(|| format!("loading parameters from {}", DEFAULT_PARAMETERS_PATH))?,
            None => Assumptions::calculator_defaults(),
        };

        let params = &mut assumptions.parameters;
        if let Some(v) = self.current_age { params.current_age = v; }
        if let Some(v) = self.max_age { params.max_age = v; }
        if let Some(v) = self.retirement_age { params.retirement_age = v; }
        if let Some(v) = self.initial_savings { params.initial_savings = v; }
        if let Some(v) = self.annual_contribution { params.annual_contribution = v; }
        if let Some(v) = self.return_before { params.return_rate_before_retirement = v; }
        if let Some(v) = self.return_after { params.return_rate_after_retirement = v; }
        if let Some(v) = self.inflation { params.inflation_rate = v; }

        params.validate().context("invalid projection parameters")?;
        Ok(assumptions)
    }

    /// Load the income roster, falling back to an empty one
    fn income_sources(&self) -> Result<Vec<IncomeSource>> {
        let path = match &self.income {
            Some(path) => path.clone(),
            None if Path::new(DEFAULT_INCOME_PATH).exists() => PathBuf::from(DEFAULT_INCOME_PATH),
            None => {
                log::info!("no income roster found, projecting without income sources");
                return Ok(Vec::new());
            }
        };

        load_income_sources(&path).with_context(|| format!("loading income sources from {}", path.display()))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project { inputs, output, rows } => run_project(&inputs, &output, rows),
        Commands::Sweep { inputs, from, to } => run_sweep(&inputs, from, to),
        Commands::Opportunities { control, opportunities, csv } => {
            run_opportunities(control, opportunities.as_deref(), csv)
        }
    }
}

fn run_project(inputs: &InputArgs, output: &Path, rows: usize) -> Result<()> {
    let assumptions = inputs.assumptions()?;
    let sources = inputs.income_sources()?;
    let params = &assumptions.parameters;

    println!("Retirement Projector v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    println!("  Ages: {} to {} (retire at {})", params.current_age, params.max_age, params.retirement_age);
    println!("  Initial savings: ${:.2}", params.initial_savings);
    println!("  Annual contribution: ${:.2}", params.annual_contribution);
    println!("  Income sources: {}", sources.len());
    println!();

    let engine = ProjectionEngine::new(params.clone());
    let result = engine.project(&sources);

    println!("{:>4} {:>13} {:>14} {:>14} {:>12} {:>16}",
        "Age", "Phase", "Income", "Desired", "Withdrawal", "Savings");
    println!("{}", "-".repeat(78));

    for row in result.rows.iter().take(rows) {
        println!("{:>4} {:>13} {:>14.2} {:>14.2} {:>12.2} {:>16.2}",
            row.age,
            format!("{:?}", row.phase),
            row.total_income,
            row.desired_income,
            row.withdrawal,
            row.savings_balance,
        );
    }

    if result.len() > rows {
        println!("... ({} more years)", result.len() - rows);
    }

    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    result.write_csv(BufWriter::new(file)).context("writing projection CSV")?;
    println!("\nFull results written to: {}", output.display());

    let summary = result.summary(&sources, &assumptions.summary);
    println!("\nSummary:");
    println!("  Starting income: ${:.2}", summary.starting_income);
    println!("  Consumed income: ${:.0}", summary.consumed_income);
    println!("  Age income drops: {}", summary.age_income_drops);
    println!("  Final balance: ${:.2}", summary.final_balance);
    println!("\n{} {}", summary.outcome.headline(), summary.outcome.message());

    Ok(())
}

fn run_sweep(inputs: &InputArgs, from: u32, to: u32) -> Result<()> {
    if to < from {
        bail!("sweep range is empty: {} to {}", from, to);
    }

    let runner = ScenarioRunner::with_assumptions(inputs.assumptions()?);
    let sources = inputs.income_sources()?;

    println!("{:>6} {:>16} {:>10} {:>14}", "Retire", "Final balance", "Drop age", "Outcome");
    println!("{}", "-".repeat(50));

    for point in runner.retirement_age_sweep(&sources, from..=to) {
        println!("{:>6} {:>16.2} {:>10} {:>14}",
            point.retirement_age,
            point.summary.final_balance,
            point.summary.age_income_drops,
            format!("{:?}", point.summary.outcome),
        );
    }

    Ok(())
}

fn run_opportunities(control: f64, opportunities: Option<&str>, as_csv: bool) -> Result<()> {
    let control = clamp_control_cost(control);
    let opportunities = match opportunities {
        Some(input) if !input.trim().is_empty() => parse_opportunities(input, control),
        _ => DEFAULT_OPPORTUNITIES.to_vec(),
    };
    let rows = build_table(control, &opportunities);

    if as_csv {
        print!("{}", table_to_csv(&rows).context("formatting opportunity CSV")?);
        return Ok(());
    }

    println!("Control: {:.1}%\n", control);
    println!("{:>12} {:>10}", "Opportunity", "Return");
    for row in &rows {
        let marker = if row.is_control { " <- control" } else { "" };
        let formatted = row.control_return.map(format_return).unwrap_or_else(|| "n/a".to_string());
        println!("{:>11.1}% {:>10}{}", row.opportunity, formatted, marker);
    }

    Ok(())
}
