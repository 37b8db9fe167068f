use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use bilancio_core::crisis::ExtraAccountingAlert;
use bilancio_core::indicators::ScoreVector;
use bilancio_core::projection::GrowthAssumption;
use bilancio_core::reference::ReferenceData;
use bilancio_core::statements::FinancialStatements;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> NapiResult<T> {
    serde_json::from_str(json).map_err(to_napi_error)
}

/// Built-in reference data unless the caller supplies its own.
fn reference_data(json: Option<String>) -> NapiResult<ReferenceData> {
    match json {
        Some(json) => ReferenceData::from_json(&json).map_err(to_napi_error),
        None => Ok(ReferenceData::default()),
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[napi]
pub fn reclassify(statements_json: String) -> NapiResult<String> {
    let fs: FinancialStatements = parse(&statements_json)?;
    let output = bilancio_core::reclassify::reclassify(&fs.balance, &fs.income);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct AnnualizeInput {
    partial: FinancialStatements,
    period_months: u32,
    reference: FinancialStatements,
}

#[napi]
pub fn annualize(input_json: String) -> NapiResult<String> {
    let input: AnnualizeInput = parse(&input_json)?;
    let output =
        bilancio_core::annualize::annualize(&input.partial, input.period_months, &input.reference)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ProjectInput {
    reference: FinancialStatements,
    partial: FinancialStatements,
    assumptions: GrowthAssumption,
}

#[derive(Deserialize)]
struct ProjectMultiYearInput {
    reference: FinancialStatements,
    partial: FinancialStatements,
    assumptions: Vec<GrowthAssumption>,
}

#[napi]
pub fn project(input_json: String) -> NapiResult<String> {
    let input: ProjectInput = parse(&input_json)?;
    let output =
        bilancio_core::projection::project(&input.reference, &input.partial, &input.assumptions)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_multi_year(input_json: String) -> NapiResult<String> {
    let input: ProjectMultiYearInput = parse(&input_json)?;
    let output = bilancio_core::projection::project_multi_year(
        &input.reference,
        &input.partial,
        &input.assumptions,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_indicators(statements_json: String) -> NapiResult<String> {
    let fs: FinancialStatements = parse(&statements_json)?;
    let output = bilancio_core::indicators::compute_indicators(&fs.balance, &fs.income);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn score_indicators(indicators_json: String) -> NapiResult<String> {
    let set: bilancio_core::indicators::IndicatorSet = parse(&indicators_json)?;
    let output = bilancio_core::indicators::score_indicators(&set);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Crisis
// ---------------------------------------------------------------------------

/// Returns the band code, e.g. "B2".
#[napi]
pub fn classify_crisis(scores_json: String, alert_count: u32) -> NapiResult<String> {
    let scores: ScoreVector = parse(&scores_json)?;
    Ok(bilancio_core::crisis::classify_crisis(&scores, alert_count)
        .code()
        .to_string())
}

#[derive(Deserialize)]
struct EvaluateCrisisInput {
    scores: ScoreVector,
    #[serde(default)]
    alerts: ExtraAccountingAlert,
}

#[napi]
pub fn evaluate_crisis(input_json: String, reference_json: Option<String>) -> NapiResult<String> {
    let input: EvaluateCrisisInput = parse(&input_json)?;
    let rd = reference_data(reference_json)?;
    let output = bilancio_core::crisis::evaluate_crisis(&input.scores, &input.alerts, &rd)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn build_comparison(input_json: String, reference_json: Option<String>) -> NapiResult<String> {
    let input: bilancio_core::comparison::ComparisonInput = parse(&input_json)?;
    let rd = reference_data(reference_json)?;
    let output =
        bilancio_core::comparison::build_comparison(&input, &rd).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_reference_data() -> NapiResult<String> {
    serde_json::to_string(&ReferenceData::default()).map_err(to_napi_error)
}
