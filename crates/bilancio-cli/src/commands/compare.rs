use clap::Args;
use serde_json::Value;

use bilancio_core::comparison::{build_comparison, ComparisonInput};
use bilancio_core::reference::ReferenceData;

use super::load_input;

/// Arguments for the multi-column comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON/YAML comparison input
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(
    args: CompareArgs,
    rd: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    let data: ComparisonInput = load_input(args.input.as_deref(), "compare")?;
    let result = build_comparison(&data, rd)?;
    Ok(serde_json::to_value(result)?)
}
