mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use bilancio_core::reference::ReferenceData;
use commands::compare::CompareArgs;
use commands::crisis::ClassifyArgs;
use commands::indicators::IndicatorArgs;
use commands::projection::ProjectArgs;
use commands::statements::{AnnualizeArgs, ReclassifyArgs};

/// Italian-GAAP budget projections and crisis rating
#[derive(Parser)]
#[command(
    name = "bilancio",
    version,
    about = "Italian-GAAP budget projections and crisis rating",
    long_about = "A CLI for reclassifying Italian financial statements, annualizing \
                  partial years, projecting budgets with a balancing cash plug, and \
                  scoring the 14 health indicators into a crisis band. All figures \
                  use decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level or filter directives (BILANCIO_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// JSON/YAML file replacing the built-in labels, alerts and sectors
    #[arg(long, global = true)]
    reference_data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reclassify statement codes into standard aggregates
    Reclassify(ReclassifyArgs),
    /// Annualize a partial-year statement against its reference year
    Annualize(AnnualizeArgs),
    /// Project one or more forecast years
    Project(ProjectArgs),
    /// Compute the 14 health indicators
    Indicators(IndicatorArgs),
    /// Score the health indicators on a 0-1 scale
    Score(IndicatorArgs),
    /// Classify into a crisis band
    Classify(ClassifyArgs),
    /// Historical, annualized and projected columns side by side
    Compare(CompareArgs),
    /// Print the reference data in use
    Reference,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn load_reference_data(path: Option<&str>) -> Result<ReferenceData, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_data(path),
        None => Ok(ReferenceData::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let rd = match load_reference_data(cli.reference_data.as_deref()) {
        Ok(rd) => rd,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Reclassify(args) => commands::statements::run_reclassify(args, &rd),
        Commands::Annualize(args) => commands::statements::run_annualize(args),
        Commands::Project(args) => commands::projection::run_project(args),
        Commands::Indicators(args) => commands::indicators::run_indicators(args),
        Commands::Score(args) => commands::indicators::run_score(args),
        Commands::Classify(args) => commands::crisis::run_classify(args, &rd),
        Commands::Compare(args) => commands::compare::run_compare(args, &rd),
        Commands::Reference => commands::reference::run_reference(&rd),
        Commands::Version => {
            println!("bilancio {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
