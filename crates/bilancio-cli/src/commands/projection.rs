use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use bilancio_core::projection::{project, project_multi_year, GrowthAssumption};
use bilancio_core::statements::FinancialStatements;

use super::load_input;

/// Arguments for budget projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to a JSON/YAML projection input
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Prior full year
    pub reference: FinancialStatements,
    /// Current actual; the reference year is used when absent
    #[serde(default)]
    pub partial: Option<FinancialStatements>,
    /// One record per forecast year
    pub assumptions: Vec<GrowthAssumption>,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data: ProjectInput = load_input(args.input.as_deref(), "project")?;
    let partial = data.partial.as_ref().unwrap_or(&data.reference);

    match data.assumptions.as_slice() {
        [single] => Ok(serde_json::to_value(project(&data.reference, partial, single)?)?),
        many => Ok(serde_json::to_value(project_multi_year(
            &data.reference,
            partial,
            many,
        )?)?),
    }
}
