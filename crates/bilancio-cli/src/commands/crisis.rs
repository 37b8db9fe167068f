use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bilancio_core::crisis::{classify_counts, evaluate_crisis, ExtraAccountingAlert};
use bilancio_core::indicators::{compute_indicators, score_indicators, ScoreVector};
use bilancio_core::reference::ReferenceData;
use bilancio_core::statements::FinancialStatements;

use super::load_input;

/// Arguments for crisis classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Path to a JSON/YAML file with statements or scores plus alerts
    #[arg(long)]
    pub input: Option<String>,
    /// Number of indicators beyond threshold
    #[arg(long, requires = "alerts")]
    pub oltre: Option<u32>,
    /// Number of active extra-accounting alerts
    #[arg(long, requires = "oltre")]
    pub alerts: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyInput {
    pub statements: Option<FinancialStatements>,
    pub scores: Option<ScoreVector>,
    pub alerts: ExtraAccountingAlert,
}

pub fn run_classify(
    args: ClassifyArgs,
    rd: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let (Some(oltre), Some(alerts)) = (args.oltre, args.alerts) {
        let rating = classify_counts(oltre, alerts);
        return Ok(json!({
            "result": {
                "rating": rating.code(),
                "description": rating.description(),
                "oltre_count": oltre,
                "alert_count": alerts,
            }
        }));
    }

    let data: ClassifyInput = load_input(args.input.as_deref(), "classify")?;
    let scores = match (data.scores, &data.statements) {
        (Some(scores), _) => scores,
        (None, Some(fs)) => score_indicators(&compute_indicators(&fs.balance, &fs.income)),
        (None, None) => {
            return Err("classify input needs `scores` or `statements`".into());
        }
    };
    let result = evaluate_crisis(&scores, &data.alerts, rd)?;
    Ok(serde_json::to_value(result)?)
}
