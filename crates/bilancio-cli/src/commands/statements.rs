use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bilancio_core::annualize::annualize;
use bilancio_core::reclassify::reclassify;
use bilancio_core::reference::ReferenceData;
use bilancio_core::statements::{
    balance_sheet_layout, income_statement_layout, FinancialStatements,
};

use super::load_input;

/// Arguments for statement reclassification
#[derive(Args)]
pub struct ReclassifyArgs {
    /// Path to a JSON/YAML statement pair
    #[arg(long)]
    pub input: Option<String>,
    /// Include the labelled presentation rows
    #[arg(long)]
    pub rows: bool,
}

pub fn run_reclassify(
    args: ReclassifyArgs,
    rd: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    let fs: FinancialStatements = load_input(args.input.as_deref(), "reclassify")?;
    let reclassified = reclassify(&fs.balance, &fs.income);

    if !args.rows {
        return Ok(json!({ "result": reclassified }));
    }

    let rows: Vec<Value> = income_statement_layout(rd)
        .into_iter()
        .chain(balance_sheet_layout(rd))
        .map(|row| {
            json!({
                "label": row.label(),
                "value": row.value(&fs, &reclassified),
            })
        })
        .collect();
    Ok(json!({ "result": reclassified, "rows": rows }))
}

/// Arguments for partial-year annualization
#[derive(Args)]
pub struct AnnualizeArgs {
    /// Path to a JSON/YAML file with `partial` and `reference` statements
    #[arg(long)]
    pub input: Option<String>,
    /// Months covered by the partial statement (defaults to its declared period)
    #[arg(long)]
    pub months: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnnualizeInput {
    pub partial: FinancialStatements,
    pub reference: FinancialStatements,
}

pub fn run_annualize(args: AnnualizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data: AnnualizeInput = load_input(args.input.as_deref(), "annualize")?;
    let months = args.months.unwrap_or(data.partial.income.period_months);
    let result = annualize(&data.partial, months, &data.reference)?;
    Ok(serde_json::to_value(result)?)
}
