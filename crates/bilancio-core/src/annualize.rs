use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::reclassify::{reclassify, Aggregate, ReclassifiedStatement};
use crate::statements::snapshot::validate_period_months;
use crate::statements::{BalanceSheetCode, FinancialStatements, IncomeStatementCode};
use crate::types::{safe_divide, with_metadata, ComputationOutput, Money, Percent, MONTHS_IN_YEAR};
use crate::BilancioResult;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineNature {
    /// Point-in-time balance, passed through unchanged.
    Stock,
    /// Period flow, rescaled by the annualization factor.
    Flow,
    /// Reclassified income aggregate, recomputed from annualized flows.
    Aggregate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualizedLine {
    pub code: String,
    pub nature: LineNature,
    pub partial: Money,
    pub annualized: Money,
    pub reference: Money,
    pub pct_of_reference: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualizedStatement {
    pub period_months: u32,
    pub factor: Decimal,
    pub statements: FinancialStatements,
    pub reclassified: ReclassifiedStatement,
    pub lines: Vec<AnnualizedLine>,
}

#[derive(Serialize)]
struct AnnualizeAssumptions<'a> {
    period_months: u32,
    partial: &'a FinancialStatements,
    reference: &'a FinancialStatements,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rescale a partial-year statement to a full-year equivalent and compare
/// every line with the reference year.
pub fn annualize(
    partial: &FinancialStatements,
    period_months: u32,
    reference: &FinancialStatements,
) -> BilancioResult<ComputationOutput<AnnualizedStatement>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_period_months("period_months", period_months)?;

    if partial.income.period_months != period_months {
        warnings.push(format!(
            "Partial statement declares {} months; annualizing over {} months as requested",
            partial.income.period_months, period_months
        ));
    }
    if reference.income.period_months != MONTHS_IN_YEAR {
        warnings.push(format!(
            "Reference statement covers {} months, not a full year",
            reference.income.period_months
        ));
    }

    let factor = annualization_factor(period_months);
    let statements = annualize_statements(partial, period_months);
    let reclassified = reclassify(&statements.balance, &statements.income);

    let mut lines = Vec::with_capacity(
        BalanceSheetCode::ALL.len() + IncomeStatementCode::ALL.len() + Aggregate::INCOME.len(),
    );

    for code in BalanceSheetCode::ALL {
        let value = partial.balance.get(code);
        lines.push(build_line(
            code.code(),
            LineNature::Stock,
            value,
            value,
            reference.balance.get(code),
        ));
    }

    for code in IncomeStatementCode::ALL {
        lines.push(build_line(
            code.code(),
            LineNature::Flow,
            partial.income.get(code),
            statements.income.get(code),
            reference.income.get(code),
        ));
    }

    let partial_agg = reclassify(&partial.balance, &partial.income);
    let reference_agg = reclassify(&reference.balance, &reference.income);
    for aggregate in Aggregate::INCOME {
        lines.push(build_line(
            aggregate.key(),
            LineNature::Aggregate,
            aggregate.value(&partial_agg),
            aggregate.value(&reclassified),
            aggregate.value(&reference_agg),
        ));
    }

    tracing::debug!(period_months, %factor, "annualized partial statement");

    let output = AnnualizedStatement {
        period_months,
        factor,
        statements,
        reclassified,
        lines,
    };

    let assumptions = AnnualizeAssumptions {
        period_months,
        partial,
        reference,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Linear annualization (12 / months) with reference-year comparison",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// `12 / months`
pub fn annualization_factor(period_months: u32) -> Decimal {
    Decimal::from(MONTHS_IN_YEAR) / Decimal::from(period_months)
}

/// Partial value as a percentage of the reference value; zero when the
/// reference is zero.
pub fn pct_of_reference(partial: Money, reference: Money) -> Percent {
    safe_divide(partial, reference) * Decimal::ONE_HUNDRED
}

/// Scale every income flow to twelve months; balances pass through.
/// Multiplies before dividing so that exact inputs stay exact.
pub(crate) fn annualize_statements(
    partial: &FinancialStatements,
    period_months: u32,
) -> FinancialStatements {
    let months = Decimal::from(period_months);
    let year = Decimal::from(MONTHS_IN_YEAR);
    let mut income = partial.income.clone();
    for code in IncomeStatementCode::ALL {
        income.set(code, partial.income.get(code) * year / months);
    }
    income.period_months = MONTHS_IN_YEAR;

    FinancialStatements {
        label: partial.label.clone(),
        balance: partial.balance.clone(),
        income,
    }
}

fn build_line(
    code: &str,
    nature: LineNature,
    partial: Money,
    annualized: Money,
    reference: Money,
) -> AnnualizedLine {
    AnnualizedLine {
        code: code.to_string(),
        nature,
        partial,
        annualized,
        reference,
        pct_of_reference: pct_of_reference(partial, reference),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BilancioError;
    use rust_decimal_macros::dec;

    fn reference_year() -> FinancialStatements {
        let mut fs = FinancialStatements::default();
        fs.income.ricavi_vendite = dec!(1_000_000);
        fs.income.materie_prime = dec!(400_000);
        fs.income.imposte = dec!(20_000);
        fs.balance.rimanenze = dec!(50_000);
        fs.balance.capitale = dec!(50_000);
        fs
    }

    fn partial_half_year() -> FinancialStatements {
        let mut fs = FinancialStatements::default();
        fs.income.period_months = 6;
        fs.income.ricavi_vendite = dec!(550_000);
        fs.income.materie_prime = dec!(210_000);
        fs.income.imposte = dec!(12_000);
        fs.balance.rimanenze = dec!(60_000);
        fs.balance.capitale = dec!(60_000);
        fs
    }

    fn line<'a>(out: &'a AnnualizedStatement, code: &str) -> &'a AnnualizedLine {
        out.lines.iter().find(|l| l.code == code).unwrap()
    }

    #[test]
    fn test_half_year_doubles_flows() {
        let result = annualize(&partial_half_year(), 6, &reference_year()).unwrap();
        let out = &result.result;

        assert_eq!(out.factor, dec!(2));
        assert_eq!(out.statements.income.ricavi_vendite, dec!(1_100_000));
        assert_eq!(out.statements.income.materie_prime, dec!(420_000));
        assert_eq!(out.statements.income.period_months, 12);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_balances_pass_through() {
        let partial = partial_half_year();
        let result = annualize(&partial, 6, &reference_year()).unwrap();
        assert_eq!(result.result.statements.balance, partial.balance);
        let stock = line(&result.result, "sp05");
        assert_eq!(stock.nature, LineNature::Stock);
        assert_eq!(stock.annualized, dec!(60_000));
    }

    #[test]
    fn test_pct_of_reference_uses_partial_value() {
        let result = annualize(&partial_half_year(), 6, &reference_year()).unwrap();
        let revenue = line(&result.result, "ce01");
        // 550k / 1M * 100
        assert_eq!(revenue.pct_of_reference, dec!(55));
        let inventory = line(&result.result, "sp05");
        assert_eq!(inventory.pct_of_reference, dec!(120));
    }

    #[test]
    fn test_pct_of_reference_zero_reference() {
        let result = annualize(&partial_half_year(), 6, &reference_year()).unwrap();
        let staff = line(&result.result, "ce08");
        assert_eq!(staff.pct_of_reference, Decimal::ZERO);
        assert_eq!(pct_of_reference(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_aggregates_recomputed_after_scaling() {
        let result = annualize(&partial_half_year(), 6, &reference_year()).unwrap();
        let net = line(&result.result, "net_profit");
        assert_eq!(net.nature, LineNature::Aggregate);
        // (550 - 210 - 12) * 2 thousand
        assert_eq!(net.annualized, dec!(656_000));
        assert_eq!(result.result.reclassified.income.net_profit, dec!(656_000));
    }

    #[test]
    fn test_twelve_months_is_identity_on_flows() {
        let mut full = partial_half_year();
        full.income.period_months = 12;
        let result = annualize(&full, 12, &reference_year()).unwrap();
        for code in IncomeStatementCode::ALL {
            assert_eq!(result.result.statements.income.get(code), full.income.get(code));
        }
    }

    #[test]
    fn test_seven_months_factor() {
        let mut partial = partial_half_year();
        partial.income.period_months = 7;
        partial.income.ricavi_vendite = dec!(700_000);
        let result = annualize(&partial, 7, &reference_year()).unwrap();
        let diff = (result.result.statements.income.ricavi_vendite - dec!(1_200_000)).abs();
        assert!(diff < dec!(0.01), "expected ~1.2M, diff {diff}");
    }

    #[test]
    fn test_invalid_period_rejected() {
        let err = annualize(&partial_half_year(), 0, &reference_year()).unwrap_err();
        match err {
            BilancioError::InvalidInput { field, .. } => assert_eq!(field, "period_months"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
        assert!(annualize(&partial_half_year(), 13, &reference_year()).is_err());
    }

    #[test]
    fn test_period_mismatch_warns() {
        let result = annualize(&partial_half_year(), 9, &reference_year()).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("declares 6 months")));
    }
}
