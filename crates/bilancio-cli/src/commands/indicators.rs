use clap::Args;
use serde_json::{json, Value};

use bilancio_core::indicators::{compute_indicators, score_indicators, Indicator};
use bilancio_core::statements::FinancialStatements;

use super::load_input;

/// Arguments for indicator computation and scoring
#[derive(Args)]
pub struct IndicatorArgs {
    /// Path to a JSON/YAML statement pair
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_indicators(args: IndicatorArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fs: FinancialStatements = load_input(args.input.as_deref(), "indicators")?;
    let set = compute_indicators(&fs.balance, &fs.income);
    Ok(json!({ "result": set }))
}

pub fn run_score(args: IndicatorArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fs: FinancialStatements = load_input(args.input.as_deref(), "score")?;
    let set = compute_indicators(&fs.balance, &fs.income);
    let scores = score_indicators(&set);

    let rows: Vec<Value> = Indicator::ALL
        .iter()
        .map(|i| {
            json!({
                "indicator": i.key(),
                "label": i.label(),
                "value": set.value(*i),
                "score": scores.get(*i),
                "beyond_threshold": scores.beyond_threshold().contains(i),
            })
        })
        .collect();

    Ok(json!({
        "result": {
            "oltre_count": scores.oltre_count(),
            "scores": scores,
        },
        "indicators": rows,
    }))
}
