use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::annualize::annualize;
use crate::crisis::{classify_crisis, CrisisRating, ExtraAccountingAlert};
use crate::error::BilancioError;
use crate::indicators::{compute_indicators, score_indicators, IndicatorSet, ScoreVector};
use crate::projection::{project_multi_year, GrowthAssumption};
use crate::reclassify::{reclassify, ReclassifiedStatement};
use crate::reference::ReferenceData;
use crate::statements::{
    balance_sheet_layout, income_statement_layout, FinancialStatements, StatementRow,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::BilancioResult;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Current-year actual and the months it covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPeriod {
    pub statements: FinancialStatements,
    pub period_months: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonInput {
    /// Full historical years, oldest first
    pub historical: Vec<FinancialStatements>,
    pub current: Option<CurrentPeriod>,
    pub assumptions: Vec<GrowthAssumption>,
    pub alerts: ExtraAccountingAlert,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Historical,
    Annualized,
    Projected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonColumn {
    pub label: String,
    pub kind: ColumnKind,
    pub statements: FinancialStatements,
    pub reclassified: ReclassifiedStatement,
    pub indicators: IndicatorSet,
    pub scores: ScoreVector,
    pub rating: CrisisRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub row: StatementRow,
    /// One entry per column; `None` for headers
    pub values: Vec<Option<Money>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<ComparisonRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate historical, annualized and projected columns side by side.
pub fn build_comparison(
    input: &ComparisonInput,
    reference: &ReferenceData,
) -> BilancioResult<ComputationOutput<Comparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let latest = input.historical.last().ok_or_else(|| {
        BilancioError::InsufficientData("At least one historical year is required".into())
    })?;
    let alert_count = input.alerts.active_count();
    let mut columns = Vec::new();

    for (i, fs) in input.historical.iter().enumerate() {
        let label = fs
            .label
            .clone()
            .unwrap_or_else(|| format!("Year {}", i + 1));
        columns.push(evaluate_column(label, ColumnKind::Historical, fs.clone(), alert_count));
    }

    if let Some(current) = &input.current {
        let annualized = annualize(&current.statements, current.period_months, latest)?;
        warnings.extend(annualized.warnings);
        let label = format!(
            "{} ({}m annualized)",
            current.statements.label.as_deref().unwrap_or("Current"),
            current.period_months
        );
        columns.push(evaluate_column(
            label,
            ColumnKind::Annualized,
            annualized.result.statements,
            alert_count,
        ));
    }

    let partial = match &input.current {
        Some(current) => {
            let mut statements = current.statements.clone();
            statements.income.period_months = current.period_months;
            statements
        }
        None => latest.clone(),
    };
    if !input.assumptions.is_empty() {
        let projected = project_multi_year(latest, &partial, &input.assumptions)?;
        warnings.extend(projected.warnings);
        for year in &projected.result {
            columns.push(evaluate_column(
                year.forecast_year.to_string(),
                ColumnKind::Projected,
                year.statements(),
                alert_count,
            ));
        }
    }

    let rows = income_statement_layout(reference)
        .into_iter()
        .chain(balance_sheet_layout(reference))
        .map(|row| {
            let values = columns
                .iter()
                .map(|c| row.value(&c.statements, &c.reclassified))
                .collect();
            ComparisonRow { row, values }
        })
        .collect();

    tracing::debug!(columns = columns.len(), alert_count, "assembled comparison");

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Historical, annualized and projected columns with indicator scoring and crisis band",
        input,
        warnings,
        elapsed,
        Comparison { columns, rows },
    ))
}

fn evaluate_column(
    label: String,
    kind: ColumnKind,
    statements: FinancialStatements,
    alert_count: u32,
) -> ComparisonColumn {
    let reclassified = reclassify(&statements.balance, &statements.income);
    let indicators = compute_indicators(&statements.balance, &statements.income);
    let scores = score_indicators(&indicators);
    let rating = classify_crisis(&scores, alert_count);
    ComparisonColumn {
        label,
        kind,
        statements,
        reclassified,
        indicators,
        scores,
        rating,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
