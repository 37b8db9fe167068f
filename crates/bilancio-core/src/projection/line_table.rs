use serde::{Deserialize, Serialize};

use super::assumptions::{FixedShareField, GrowthField};
use crate::statements::IncomeStatementCode;

/// How a projected income line is driven by the assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "driver", rename_all = "snake_case")]
pub enum LineDriver {
    /// `reference × (1 + g/100)`
    Growth { growth: GrowthField },
    /// Fixed part grows with its own rate, the rest follows revenue.
    GrowthWithFixedShare {
        growth: GrowthField,
        fixed_share: FixedShareField,
    },
    /// Rate on reference-year fixed assets plus new investments.
    DepreciationRate,
    /// Annualized charges plus interest on new financing.
    FinancingInterest,
    /// Rate on positive pre-tax profit.
    TaxRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum LineKind {
    /// The user may supply the projected value directly.
    Editable(LineDriver),
    /// Always computed.
    Derived(LineDriver),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRule {
    pub code: IncomeStatementCode,
    pub kind: LineKind,
}

impl LineRule {
    pub fn is_editable(&self) -> bool {
        matches!(self.kind, LineKind::Editable(_))
    }

    pub fn driver(&self) -> LineDriver {
        match self.kind {
            LineKind::Editable(d) | LineKind::Derived(d) => d,
        }
    }
}

/// Where a projected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    Override,
    Growth,
    FixedShare,
    DepreciationRate,
    Financing,
    TaxRate,
    Annualized,
}

const fn editable(code: IncomeStatementCode, driver: LineDriver) -> LineRule {
    LineRule {
        code,
        kind: LineKind::Editable(driver),
    }
}

const fn derived(code: IncomeStatementCode, driver: LineDriver) -> LineRule {
    LineRule {
        code,
        kind: LineKind::Derived(driver),
    }
}

/// Income lines with a projection rule. Every other line keeps its
/// annualized actual value. Tax comes last: it reads pre-tax profit.
pub const PROJECTION_LINES: &[LineRule] = &[
    editable(
        IncomeStatementCode::RicaviVendite,
        LineDriver::Growth {
            growth: GrowthField::Revenue,
        },
    ),
    editable(
        IncomeStatementCode::AltriRicavi,
        LineDriver::Growth {
            growth: GrowthField::OtherRevenue,
        },
    ),
    editable(
        IncomeStatementCode::MateriePrime,
        LineDriver::GrowthWithFixedShare {
            growth: GrowthField::Materials,
            fixed_share: FixedShareField::Materials,
        },
    ),
    editable(
        IncomeStatementCode::Servizi,
        LineDriver::GrowthWithFixedShare {
            growth: GrowthField::Services,
            fixed_share: FixedShareField::Services,
        },
    ),
    editable(
        IncomeStatementCode::GodimentoBeni,
        LineDriver::Growth {
            growth: GrowthField::Rent,
        },
    ),
    editable(
        IncomeStatementCode::CostiPersonale,
        LineDriver::Growth {
            growth: GrowthField::Personnel,
        },
    ),
    editable(IncomeStatementCode::Ammortamenti, LineDriver::DepreciationRate),
    editable(
        IncomeStatementCode::OneriDiversi,
        LineDriver::Growth {
            growth: GrowthField::OtherCosts,
        },
    ),
    derived(IncomeStatementCode::OneriFinanziari, LineDriver::FinancingInterest),
    derived(IncomeStatementCode::Imposte, LineDriver::TaxRate),
];

pub fn rule_for(code: IncomeStatementCode) -> Option<&'static LineRule> {
    PROJECTION_LINES.iter().find(|r| r.code == code)
}

pub fn is_editable(code: IncomeStatementCode) -> bool {
    rule_for(code).is_some_and(LineRule::is_editable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editable_whitelist() {
        let editable: Vec<IncomeStatementCode> = PROJECTION_LINES
            .iter()
            .filter(|r| r.is_editable())
            .map(|r| r.code)
            .collect();
        assert_eq!(
            editable,
            vec![
                IncomeStatementCode::RicaviVendite,
                IncomeStatementCode::AltriRicavi,
                IncomeStatementCode::MateriePrime,
                IncomeStatementCode::Servizi,
                IncomeStatementCode::GodimentoBeni,
                IncomeStatementCode::CostiPersonale,
                IncomeStatementCode::Ammortamenti,
                IncomeStatementCode::OneriDiversi,
            ]
        );
    }

    #[test]
    fn test_derived_lines_not_editable() {
        assert!(!is_editable(IncomeStatementCode::Imposte));
        assert!(!is_editable(IncomeStatementCode::OneriFinanziari));
        assert!(!is_editable(IncomeStatementCode::ProventiStraordinari));
        assert_eq!(
            rule_for(IncomeStatementCode::Imposte).map(LineRule::driver),
            Some(LineDriver::TaxRate)
        );
        assert!(rule_for(IncomeStatementCode::ProventiStraordinari).is_none());
    }

    #[test]
    fn test_tax_rule_is_last() {
        assert_eq!(
            PROJECTION_LINES.last().map(|r| r.code),
            Some(IncomeStatementCode::Imposte)
        );
    }
}
