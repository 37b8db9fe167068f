use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assumptions::GrowthAssumption;
use super::income::{apply_growth, ProjectedIncomeStatement};
use crate::error::BilancioError;
use crate::reclassify::{reclassify_balance, BalanceAggregates};
use crate::statements::{BalanceSheetSnapshot, FinancialStatements};
use crate::types::{Money, BALANCE_TOLERANCE, DAYS_IN_YEAR};
use crate::BilancioResult;

// ---------------------------------------------------------------------------
// Turnover ratios
// ---------------------------------------------------------------------------

/// Reference-year working-capital balances expressed in days of their
/// matching flow. `None` when the flow is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnoverDays {
    pub inventory_days: Option<Decimal>,
    pub receivable_days: Option<Decimal>,
    pub payable_days: Option<Decimal>,
}

fn days_of(balance: Money, flow: Money) -> Option<Decimal> {
    if flow.is_zero() {
        None
    } else {
        Some(balance / flow * DAYS_IN_YEAR)
    }
}

/// Short-term debt owed to suppliers, i.e. net of short-term financial debt
/// when the lender breakdown is known.
pub fn trade_payables(balance: &BalanceSheetSnapshot) -> Money {
    let financial = balance
        .debt_breakdown
        .as_ref()
        .map(|b| b.short_term())
        .unwrap_or(Decimal::ZERO);
    balance.debiti_breve - financial
}

pub fn turnover_days(reference: &FinancialStatements) -> TurnoverDays {
    let income = &reference.income;
    let balance = &reference.balance;
    TurnoverDays {
        inventory_days: days_of(balance.rimanenze, income.materie_prime),
        receivable_days: days_of(balance.crediti_breve, income.ricavi_vendite),
        payable_days: days_of(
            trade_payables(balance),
            income.materie_prime + income.servizi,
        ),
    }
}

// ---------------------------------------------------------------------------
// Projected balance sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBalanceSheet {
    pub snapshot: BalanceSheetSnapshot,
    pub aggregates: BalanceAggregates,
    pub turnover: TurnoverDays,
    /// Residual that balances the sheet, before the zero floor.
    pub cash_plug: Money,
    /// Shortfall moved into short-term debt when the plug is negative.
    pub implied_financing_need: Money,
}

pub(crate) fn project_balance(
    reference: &FinancialStatements,
    partial: &FinancialStatements,
    income: &ProjectedIncomeStatement,
    assumptions: &GrowthAssumption,
    warnings: &mut Vec<String>,
) -> BilancioResult<ProjectedBalanceSheet> {
    let turnover = turnover_days(reference);
    let projected = &income.statement;
    let actual = &partial.balance;

    let mut sp = actual.clone();
    sp.date = None;

    sp.rimanenze = match turnover.inventory_days {
        Some(days) => projected.materie_prime * days / DAYS_IN_YEAR,
        None => {
            tracing::debug!("inventory days undefined, keeping actual value");
            warnings.push(
                "Reference raw-materials cost is zero: inventory kept at actual value".into(),
            );
            actual.rimanenze
        }
    };

    sp.crediti_breve = match (assumptions.receivables_growth_pct, turnover.receivable_days) {
        (Some(g), _) => apply_growth(reference.balance.crediti_breve, g),
        (None, Some(days)) => projected.ricavi_vendite * days / DAYS_IN_YEAR,
        (None, None) => {
            tracing::debug!("receivable days undefined, keeping actual value");
            warnings.push(
                "Reference revenue is zero: receivables kept at actual value".into(),
            );
            actual.crediti_breve
        }
    };

    let payables = match (assumptions.payables_growth_pct, turnover.payable_days) {
        (Some(g), _) => apply_growth(trade_payables(&reference.balance), g),
        (None, Some(days)) => {
            (projected.materie_prime + projected.servizi) * days / DAYS_IN_YEAR
        }
        (None, None) => {
            tracing::debug!("payable days undefined, keeping actual value");
            warnings.push(
                "Reference purchases are zero: payables kept at actual value".into(),
            );
            trade_payables(actual)
        }
    };
    let short_term_financial = actual.debiti_breve - trade_payables(actual);
    sp.debiti_breve = payables + short_term_financial;

    sp.immob_materiali += assumptions.investments;

    if assumptions.has_financing() {
        let first_year_repayment =
            assumptions.financing_amount / Decimal::from(assumptions.financing_duration_years);
        let outstanding = assumptions.financing_amount - first_year_repayment;
        sp.debiti_lungo += outstanding;
        if let Some(breakdown) = sp.debt_breakdown.as_mut() {
            breakdown.banche_lungo += outstanding;
        }
    }

    sp.utile_perdita = income.aggregates.net_profit;

    // Cash is the residual: liabilities and equity less every non-cash asset.
    sp.disponibilita_liquide = Decimal::ZERO;
    let cash_plug = sp.total_liabilities_and_equity() - sp.total_assets();
    let implied_financing_need = if cash_plug < Decimal::ZERO {
        let need = -cash_plug;
        sp.debiti_breve += need;
        if let Some(breakdown) = sp.debt_breakdown.as_mut() {
            breakdown.banche_breve += need;
        }
        need
    } else {
        sp.disponibilita_liquide = cash_plug;
        Decimal::ZERO
    };

    verify_balance(&sp)?;

    let aggregates = reclassify_balance(&sp);
    Ok(ProjectedBalanceSheet {
        snapshot: sp,
        aggregates,
        turnover,
        cash_plug,
        implied_financing_need,
    })
}

/// Reject a projected snapshot whose sides differ by more than the tolerance.
pub(crate) fn verify_balance(sp: &BalanceSheetSnapshot) -> BilancioResult<()> {
    let difference = sp.imbalance();
    if difference.abs() <= BALANCE_TOLERANCE {
        return Ok(());
    }
    let total_assets = sp.total_assets();
    let total_liabilities_and_equity = sp.total_liabilities_and_equity();
    tracing::warn!(
        %total_assets,
        %total_liabilities_and_equity,
        %difference,
        "projected balance sheet does not balance"
    );
    Err(BilancioError::BalancingFailure {
        total_assets,
        total_liabilities_and_equity,
        difference,
    })
}
