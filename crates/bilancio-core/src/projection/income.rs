use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assumptions::GrowthAssumption;
use super::line_table::{rule_for, LineDriver, LineKind, LineSource};
use crate::reclassify::{reclassify_income, IncomeAggregates};
use crate::statements::{FinancialStatements, IncomeStatementCode, IncomeStatementPeriod};
use crate::types::{pct_to_rate, Money, Percent, MONTHS_IN_YEAR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedLine {
    pub code: IncomeStatementCode,
    pub reference: Money,
    pub annualized: Money,
    pub projected: Money,
    pub source: LineSource,
}

/// Projected full-year income statement. Aggregates are always recomputed
/// from the projected lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedIncomeStatement {
    pub statement: IncomeStatementPeriod,
    pub aggregates: IncomeAggregates,
    pub lines: Vec<ProjectedLine>,
}

/// `base × (1 + g/100)`
pub fn apply_growth(base: Money, growth_pct: Percent) -> Money {
    base * (Decimal::ONE + pct_to_rate(growth_pct))
}

/// Fixed share grows at its own rate, the variable share follows revenue.
pub fn apply_fixed_share(
    base: Money,
    growth_pct: Percent,
    fixed_share_pct: Percent,
    revenue_growth_pct: Percent,
) -> Money {
    let fixed = pct_to_rate(fixed_share_pct);
    base * (fixed * (Decimal::ONE + pct_to_rate(growth_pct))
        + (Decimal::ONE - fixed) * (Decimal::ONE + pct_to_rate(revenue_growth_pct)))
}

pub(crate) fn project_income(
    reference: &FinancialStatements,
    annualized: &IncomeStatementPeriod,
    assumptions: &GrowthAssumption,
    warnings: &mut Vec<String>,
) -> ProjectedIncomeStatement {
    for code in assumptions.overrides.keys() {
        let editable = rule_for(*code).is_some_and(|r| r.is_editable());
        if !editable {
            warnings.push(format!(
                "Override for '{}' ignored: line is not editable",
                code.key()
            ));
        }
    }

    let mut statement = annualized.clone();
    statement.period_months = MONTHS_IN_YEAR;
    let mut sources: Vec<(IncomeStatementCode, LineSource)> = Vec::new();

    for code in IncomeStatementCode::ALL {
        let Some(rule) = rule_for(code) else {
            sources.push((code, LineSource::Annualized));
            continue;
        };
        if rule.driver() == LineDriver::TaxRate {
            continue;
        }

        let base = annualized.get(code);
        let (value, source) = match rule.kind {
            LineKind::Editable(driver) => match assumptions.overrides.get(&code) {
                Some(v) => (*v, LineSource::Override),
                None => evaluate_driver(driver, code, reference, base, assumptions)
                    .unwrap_or((base, LineSource::Annualized)),
            },
            LineKind::Derived(driver) => evaluate_driver(driver, code, reference, base, assumptions)
                .unwrap_or((base, LineSource::Annualized)),
        };
        if source != LineSource::Annualized {
            tracing::debug!(code = code.key(), ?source, %value, "projected income line");
        }
        statement.set(code, value);
        sources.push((code, source));
    }

    // Tax depends on pre-tax profit, which excludes the tax line itself.
    let imposte_source = match assumptions.tax_rate_pct {
        Some(rate) => {
            let pbt = reclassify_income(&statement).profit_before_tax;
            statement.imposte = pbt.max(Decimal::ZERO) * pct_to_rate(rate);
            LineSource::TaxRate
        }
        None => LineSource::Annualized,
    };
    sources.push((IncomeStatementCode::Imposte, imposte_source));

    let lines = IncomeStatementCode::ALL
        .iter()
        .map(|code| ProjectedLine {
            code: *code,
            reference: reference.income.get(*code),
            annualized: annualized.get(*code),
            projected: statement.get(*code),
            source: sources
                .iter()
                .find(|(c, _)| c == code)
                .map(|(_, s)| *s)
                .unwrap_or(LineSource::Annualized),
        })
        .collect();

    let aggregates = reclassify_income(&statement);
    ProjectedIncomeStatement {
        statement,
        aggregates,
        lines,
    }
}

/// `None` when the driver's assumption is not supplied.
fn evaluate_driver(
    driver: LineDriver,
    code: IncomeStatementCode,
    reference: &FinancialStatements,
    annualized: Money,
    assumptions: &GrowthAssumption,
) -> Option<(Money, LineSource)> {
    let ref_value = reference.income.get(code);
    match driver {
        LineDriver::Growth { growth } => assumptions
            .growth(growth)
            .map(|g| (apply_growth(ref_value, g), LineSource::Growth)),
        LineDriver::GrowthWithFixedShare { growth, fixed_share } => {
            match assumptions.fixed_share(fixed_share) {
                Some(fs) => {
                    let g = assumptions.growth(growth).unwrap_or(Decimal::ZERO);
                    let revenue_g = assumptions.revenue_growth_pct.unwrap_or(Decimal::ZERO);
                    Some((
                        apply_fixed_share(ref_value, g, fs, revenue_g),
                        LineSource::FixedShare,
                    ))
                }
                None => assumptions
                    .growth(growth)
                    .map(|g| (apply_growth(ref_value, g), LineSource::Growth)),
            }
        }
        LineDriver::DepreciationRate => assumptions.depreciation_rate_pct.map(|rate| {
            let base = reference.balance.immob_immateriali
                + reference.balance.immob_materiali
                + assumptions.investments;
            (base * pct_to_rate(rate), LineSource::DepreciationRate)
        }),
        LineDriver::FinancingInterest => {
            if assumptions.has_financing() {
                let interest = assumptions.financing_amount * pct_to_rate(assumptions.financing_rate_pct);
                Some((annualized + interest, LineSource::Financing))
            } else {
                None
            }
        }
        // Resolved after the other lines.
        LineDriver::TaxRate => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn reference() -> FinancialStatements {
        let mut fs = FinancialStatements::default();
        fs.income.ricavi_vendite = dec!(1_000_000);
        fs.income.materie_prime = dec!(400_000);
        fs.income.servizi = dec!(200_000);
        fs.income.costi_personale = dec!(250_000);
        fs.income.ammortamenti = dec!(30_000);
        fs.income.oneri_finanziari = dec!(10_000);
        fs.income.imposte = dec!(30_000);
        fs.balance.immob_materiali = dec!(300_000);
        fs
    }

    fn project(a: &GrowthAssumption) -> (ProjectedIncomeStatement, Vec<String>) {
        let r = reference();
        let mut warnings = Vec::new();
        let out = project_income(&r, &r.income, a, &mut warnings);
        (out, warnings)
    }

    fn source(p: &ProjectedIncomeStatement, code: IncomeStatementCode) -> LineSource {
        p.lines.iter().find(|l| l.code == code).unwrap().source
    }

    #[test]
    fn test_no_assumptions_keeps_annualized() {
        let (p, warnings) = project(&GrowthAssumption::default());
        assert_eq!(p.statement, reference().income);
        assert!(p.lines.iter().all(|l| l.source == LineSource::Annualized));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_revenue_growth() {
        let (p, _) = project(&GrowthAssumption {
            revenue_growth_pct: Some(dec!(20)),
            ..Default::default()
        });
        assert_eq!(p.statement.ricavi_vendite, dec!(1_200_000));
        assert_eq!(source(&p, IncomeStatementCode::RicaviVendite), LineSource::Growth);
        assert_eq!(p.aggregates.production_value, dec!(1_200_000));
    }

    #[test]
    fn test_fixed_share_materials() {
        let (p, _) = project(&GrowthAssumption {
            revenue_growth_pct: Some(dec!(20)),
            materials_growth_pct: Some(dec!(10)),
            materials_fixed_share_pct: Some(dec!(50)),
            ..Default::default()
        });
        // 400k × (0.5 × 1.1 + 0.5 × 1.2)
        assert_eq!(p.statement.materie_prime, dec!(460_000));
        assert_eq!(source(&p, IncomeStatementCode::MateriePrime), LineSource::FixedShare);
    }

    #[test]
    fn test_override_wins_over_growth() {
        let mut overrides = BTreeMap::new();
        overrides.insert(IncomeStatementCode::Servizi, dec!(250_000));
        let (p, _) = project(&GrowthAssumption {
            services_growth_pct: Some(dec!(50)),
            overrides,
            ..Default::default()
        });
        assert_eq!(p.statement.servizi, dec!(250_000));
        assert_eq!(source(&p, IncomeStatementCode::Servizi), LineSource::Override);
    }

    #[test]
    fn test_override_on_derived_line_ignored() {
        let mut overrides = BTreeMap::new();
        overrides.insert(IncomeStatementCode::Imposte, dec!(1));
        let (p, warnings) = project(&GrowthAssumption {
            overrides,
            ..Default::default()
        });
        assert_eq!(p.statement.imposte, dec!(30_000));
        assert!(warnings.iter().any(|w| w.contains("imposte")));
    }

    #[test]
    fn test_depreciation_rate() {
        let (p, _) = project(&GrowthAssumption {
            investments: dec!(100_000),
            depreciation_rate_pct: Some(dec!(10)),
            ..Default::default()
        });
        assert_eq!(p.statement.ammortamenti, dec!(40_000));
        assert_eq!(
            source(&p, IncomeStatementCode::Ammortamenti),
            LineSource::DepreciationRate
        );
    }

    #[test]
    fn test_financing_interest_added() {
        let (p, _) = project(&GrowthAssumption {
            financing_amount: dec!(100_000),
            financing_duration_years: 5,
            financing_rate_pct: dec!(4),
            ..Default::default()
        });
        assert_eq!(p.statement.oneri_finanziari, dec!(14_000));
        assert_eq!(source(&p, IncomeStatementCode::OneriFinanziari), LineSource::Financing);
    }

    #[test]
    fn test_tax_rate_on_pre_tax_profit() {
        let (p, _) = project(&GrowthAssumption {
            tax_rate_pct: Some(dec!(24)),
            ..Default::default()
        });
        // PBT = 1M - 850k - 30k - 10k = 110k
        assert_eq!(p.aggregates.profit_before_tax, dec!(110_000));
        assert_eq!(p.statement.imposte, dec!(26_400));
        assert_eq!(p.aggregates.net_profit, dec!(83_600));
    }

    #[test]
    fn test_tax_floored_on_loss() {
        let (p, _) = project(&GrowthAssumption {
            revenue_growth_pct: Some(dec!(-50)),
            tax_rate_pct: Some(dec!(24)),
            ..Default::default()
        });
        assert!(p.aggregates.profit_before_tax < Decimal::ZERO);
        assert_eq!(p.statement.imposte, Decimal::ZERO);
    }

    #[test]
    fn test_subtotals_consistent_with_lines() {
        let (p, _) = project(&GrowthAssumption {
            revenue_growth_pct: Some(dec!(7)),
            personnel_growth_pct: Some(dec!(3)),
            tax_rate_pct: Some(dec!(27.9)),
            ..Default::default()
        });
        assert_eq!(p.aggregates, reclassify_income(&p.statement));
        assert_eq!(
            p.aggregates.net_profit,
            p.aggregates.profit_before_tax - p.statement.imposte
        );
    }
}
