use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::assumptions::GrowthAssumption;
use super::balance::{project_balance, ProjectedBalanceSheet};
use super::income::{project_income, ProjectedIncomeStatement};
use crate::annualize::annualize_statements;
use crate::error::BilancioError;
use crate::statements::FinancialStatements;
use crate::types::{with_metadata, ComputationOutput, MONTHS_IN_YEAR};
use crate::BilancioResult;

const METHODOLOGY: &str =
    "Driver-based projection: growth assumptions on income lines, turnover-day working capital, cash plug";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub forecast_year: i32,
    pub income: ProjectedIncomeStatement,
    pub balance: ProjectedBalanceSheet,
}

impl ProjectionOutput {
    /// The projected pair as a statement column.
    pub fn statements(&self) -> FinancialStatements {
        FinancialStatements {
            label: Some(self.forecast_year.to_string()),
            balance: self.balance.snapshot.clone(),
            income: self.income.statement.clone(),
        }
    }

    /// Opening position for the next forecast year: the year's profit is
    /// retained into reserves.
    pub fn closing_statements(&self) -> FinancialStatements {
        let mut fs = self.statements();
        fs.balance.riserve += fs.balance.utile_perdita;
        fs.balance.utile_perdita = Decimal::ZERO;
        fs
    }
}

#[derive(Serialize)]
struct ProjectionAssumptions<'a> {
    reference_months: u32,
    partial_months: u32,
    assumptions: &'a [GrowthAssumption],
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project one forecast year from the prior full year and the current
/// (possibly partial) actual.
pub fn project(
    reference: &FinancialStatements,
    partial: &FinancialStatements,
    assumptions: &GrowthAssumption,
) -> BilancioResult<ComputationOutput<ProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = project_year(reference, partial, assumptions, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        METHODOLOGY,
        &ProjectionAssumptions {
            reference_months: reference.income.period_months,
            partial_months: partial.income.period_months,
            assumptions: std::slice::from_ref(assumptions),
        },
        warnings,
        elapsed,
        output,
    ))
}

/// Chain projections: each year after the first uses the previous
/// projection, with its profit retained, as both reference and actual.
pub fn project_multi_year(
    reference: &FinancialStatements,
    partial: &FinancialStatements,
    assumptions: &[GrowthAssumption],
) -> BilancioResult<ComputationOutput<Vec<ProjectionOutput>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if assumptions.is_empty() {
        return Err(BilancioError::InvalidInput {
            field: "assumptions".into(),
            reason: "At least one forecast year is required".into(),
        });
    }
    if assumptions
        .windows(2)
        .any(|w| w[1].forecast_year <= w[0].forecast_year)
    {
        warnings.push("Forecast years are not strictly ascending; projecting in given order".into());
    }

    let mut years = Vec::with_capacity(assumptions.len());
    let mut chained: Option<FinancialStatements> = None;

    for a in assumptions {
        let mut year_warnings = Vec::new();
        let output = match &chained {
            None => project_year(reference, partial, a, &mut year_warnings)?,
            Some(prev) => project_year(prev, prev, a, &mut year_warnings)?,
        };
        warnings.extend(
            year_warnings
                .into_iter()
                .map(|w| format!("{}: {w}", a.forecast_year)),
        );
        chained = Some(output.closing_statements());
        years.push(output);
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        METHODOLOGY,
        &ProjectionAssumptions {
            reference_months: reference.income.period_months,
            partial_months: partial.income.period_months,
            assumptions,
        },
        warnings,
        elapsed,
        years,
    ))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn project_year(
    reference: &FinancialStatements,
    partial: &FinancialStatements,
    assumptions: &GrowthAssumption,
    warnings: &mut Vec<String>,
) -> BilancioResult<ProjectionOutput> {
    reference.income.validate()?;
    partial.income.validate()?;
    assumptions.validate()?;

    if reference.income.period_months != MONTHS_IN_YEAR {
        warnings.push(format!(
            "Reference year covers {} months; turnover days assume a full year",
            reference.income.period_months
        ));
    }
    for (name, fs) in [("Reference", reference), ("Actual", partial)] {
        if !fs.balance.is_balanced() {
            let difference = fs.balance.imbalance();
            tracing::warn!(statement = name, %difference, "input balance sheet out of balance");
            warnings.push(format!("{name} balance sheet is off by {difference}"));
        }
    }

    let annualized = annualize_statements(partial, partial.income.period_months);

    let income = project_income(reference, &annualized.income, assumptions, warnings);
    let balance = project_balance(reference, partial, &income, assumptions, warnings)?;

    if balance.implied_financing_need > Decimal::ZERO {
        warnings.push(format!(
            "Cash shortfall of {} covered by additional short-term debt",
            balance.implied_financing_need
        ));
    }
    if income.aggregates.net_profit < Decimal::ZERO {
        warnings.push(format!(
            "Projected net loss of {}",
            income.aggregates.net_profit.abs()
        ));
    }

    tracing::debug!(
        forecast_year = assumptions.forecast_year,
        net_profit = %income.aggregates.net_profit,
        cash_plug = %balance.cash_plug,
        "projected forecast year"
    );

    Ok(ProjectionOutput {
        forecast_year: assumptions.forecast_year,
        income,
        balance,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
