use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::BilancioError;
use crate::statements::IncomeStatementCode;
use crate::types::{Money, Percent};
use crate::BilancioResult;

/// Growth percentages the user may set per forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthField {
    Revenue,
    OtherRevenue,
    Materials,
    Services,
    Rent,
    Personnel,
    OtherCosts,
}

/// Cost lines split between a fixed part and a revenue-driven part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedShareField {
    Materials,
    Services,
}

/// User assumptions for one forecast year. Unset percentages leave the
/// matching line at its annualized actual value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthAssumption {
    pub forecast_year: i32,
    pub revenue_growth_pct: Option<Percent>,
    pub other_revenue_growth_pct: Option<Percent>,
    pub materials_growth_pct: Option<Percent>,
    pub services_growth_pct: Option<Percent>,
    pub rent_growth_pct: Option<Percent>,
    pub personnel_growth_pct: Option<Percent>,
    pub other_costs_growth_pct: Option<Percent>,
    /// New tangible fixed assets acquired in the year
    pub investments: Money,
    pub receivables_growth_pct: Option<Percent>,
    pub payables_growth_pct: Option<Percent>,
    pub tax_rate_pct: Option<Percent>,
    pub materials_fixed_share_pct: Option<Percent>,
    pub services_fixed_share_pct: Option<Percent>,
    /// Applied to reference-year fixed assets plus new investments
    pub depreciation_rate_pct: Option<Percent>,
    pub financing_amount: Money,
    pub financing_duration_years: u32,
    pub financing_rate_pct: Percent,
    /// Directly supplied projected values for editable lines
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<IncomeStatementCode, Money>,
}

impl GrowthAssumption {
    pub fn growth(&self, field: GrowthField) -> Option<Percent> {
        match field {
            GrowthField::Revenue => self.revenue_growth_pct,
            GrowthField::OtherRevenue => self.other_revenue_growth_pct,
            GrowthField::Materials => self.materials_growth_pct,
            GrowthField::Services => self.services_growth_pct,
            GrowthField::Rent => self.rent_growth_pct,
            GrowthField::Personnel => self.personnel_growth_pct,
            GrowthField::OtherCosts => self.other_costs_growth_pct,
        }
    }

    pub fn fixed_share(&self, field: FixedShareField) -> Option<Percent> {
        match field {
            FixedShareField::Materials => self.materials_fixed_share_pct,
            FixedShareField::Services => self.services_fixed_share_pct,
        }
    }

    /// Whether a new loan is part of this year's plan.
    pub fn has_financing(&self) -> bool {
        self.financing_amount > Decimal::ZERO
    }

    pub fn validate(&self) -> BilancioResult<()> {
        let bounded = [
            ("tax_rate_pct", self.tax_rate_pct),
            ("materials_fixed_share_pct", self.materials_fixed_share_pct),
            ("services_fixed_share_pct", self.services_fixed_share_pct),
        ];
        for (field, value) in bounded {
            if let Some(v) = value {
                if v < Decimal::ZERO || v > Decimal::ONE_HUNDRED {
                    return Err(BilancioError::InvalidInput {
                        field: field.into(),
                        reason: format!("Must be between 0 and 100, got {v}"),
                    });
                }
            }
        }

        let growths = [
            ("revenue_growth_pct", self.revenue_growth_pct),
            ("other_revenue_growth_pct", self.other_revenue_growth_pct),
            ("materials_growth_pct", self.materials_growth_pct),
            ("services_growth_pct", self.services_growth_pct),
            ("rent_growth_pct", self.rent_growth_pct),
            ("personnel_growth_pct", self.personnel_growth_pct),
            ("other_costs_growth_pct", self.other_costs_growth_pct),
            ("receivables_growth_pct", self.receivables_growth_pct),
            ("payables_growth_pct", self.payables_growth_pct),
        ];
        for (field, value) in growths {
            if let Some(g) = value {
                if g < -Decimal::ONE_HUNDRED {
                    return Err(BilancioError::InvalidInput {
                        field: field.into(),
                        reason: format!("Growth below -100% would turn the line negative, got {g}"),
                    });
                }
            }
        }

        if let Some(rate) = self.depreciation_rate_pct {
            if rate < Decimal::ZERO {
                return Err(BilancioError::InvalidInput {
                    field: "depreciation_rate_pct".into(),
                    reason: "Depreciation rate cannot be negative".into(),
                });
            }
        }
        if self.investments < Decimal::ZERO {
            return Err(BilancioError::InvalidInput {
                field: "investments".into(),
                reason: "Investments cannot be negative".into(),
            });
        }
        if self.financing_amount < Decimal::ZERO {
            return Err(BilancioError::InvalidInput {
                field: "financing_amount".into(),
                reason: "Financing amount cannot be negative".into(),
            });
        }
        if self.has_financing() && self.financing_duration_years == 0 {
            return Err(BilancioError::InvalidInput {
                field: "financing_duration_years".into(),
                reason: "Financing requires a duration of at least one year".into(),
            });
        }
        if self.financing_rate_pct < Decimal::ZERO {
            return Err(BilancioError::InvalidInput {
                field: "financing_rate_pct".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        Ok(())
    }
}
