use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reclassify::reclassify;
use crate::statements::{BalanceSheetSnapshot, IncomeStatementPeriod};
use crate::types::{safe_divide, Money, Multiple, Percent};

/// Measurement unit of a reported indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorUnit {
    Multiple,
    Percent,
    Currency,
}

/// The fixed battery of health indicators, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Dscr,
    EbitdaMargin,
    MargineTesoreria,
    Ccn,
    MargineStruttura,
    CurrentRatio,
    FixedAssetCoverage,
    FinancialIndependence,
    Pfn,
    PfnToEbitda,
    Roi,
    Roe,
    Ros,
    FinancialChargesToEbitda,
}

impl Indicator {
    pub const ALL: [Indicator; 14] = [
        Self::Dscr,
        Self::EbitdaMargin,
        Self::MargineTesoreria,
        Self::Ccn,
        Self::MargineStruttura,
        Self::CurrentRatio,
        Self::FixedAssetCoverage,
        Self::FinancialIndependence,
        Self::Pfn,
        Self::PfnToEbitda,
        Self::Roi,
        Self::Roe,
        Self::Ros,
        Self::FinancialChargesToEbitda,
    ];

    /// Position in [`Indicator::ALL`] and in every score vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Dscr => "dscr",
            Self::EbitdaMargin => "ebitda_margin",
            Self::MargineTesoreria => "margine_tesoreria",
            Self::Ccn => "ccn",
            Self::MargineStruttura => "margine_struttura",
            Self::CurrentRatio => "current_ratio",
            Self::FixedAssetCoverage => "fixed_asset_coverage",
            Self::FinancialIndependence => "financial_independence",
            Self::Pfn => "pfn",
            Self::PfnToEbitda => "pfn_to_ebitda",
            Self::Roi => "roi",
            Self::Roe => "roe",
            Self::Ros => "ros",
            Self::FinancialChargesToEbitda => "financial_charges_to_ebitda",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dscr => "DSCR",
            Self::EbitdaMargin => "EBITDA margin",
            Self::MargineTesoreria => "Margine di tesoreria",
            Self::Ccn => "Capitale circolante netto",
            Self::MargineStruttura => "Margine di struttura",
            Self::CurrentRatio => "Current ratio",
            Self::FixedAssetCoverage => "Copertura immobilizzazioni",
            Self::FinancialIndependence => "Indipendenza finanziaria",
            Self::Pfn => "Posizione finanziaria netta",
            Self::PfnToEbitda => "PFN / EBITDA",
            Self::Roi => "ROI",
            Self::Roe => "ROE",
            Self::Ros => "ROS",
            Self::FinancialChargesToEbitda => "Oneri finanziari / EBITDA",
        }
    }

    pub fn unit(&self) -> IndicatorUnit {
        match self {
            Self::Dscr | Self::CurrentRatio | Self::PfnToEbitda => IndicatorUnit::Multiple,
            Self::MargineTesoreria | Self::Ccn | Self::MargineStruttura | Self::Pfn => {
                IndicatorUnit::Currency
            }
            _ => IndicatorUnit::Percent,
        }
    }
}

/// Reported indicators plus the helper values the scorer reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub dscr: Multiple,
    pub ebitda_margin: Percent,
    pub margine_tesoreria: Money,
    pub ccn: Money,
    pub margine_struttura: Money,
    pub current_ratio: Multiple,
    pub fixed_asset_coverage: Percent,
    pub financial_independence: Percent,
    pub pfn: Money,
    pub pfn_to_ebitda: Multiple,
    pub roi: Percent,
    pub roe: Percent,
    pub ros: Percent,
    pub financial_charges_to_ebitda: Percent,
    // Scorer helpers
    pub ebitda: Money,
    pub quick_ratio: Multiple,
    pub equity_to_fixed_assets: Percent,
    pub financial_charges: Money,
}

impl IndicatorSet {
    pub fn value(&self, indicator: Indicator) -> Decimal {
        match indicator {
            Indicator::Dscr => self.dscr,
            Indicator::EbitdaMargin => self.ebitda_margin,
            Indicator::MargineTesoreria => self.margine_tesoreria,
            Indicator::Ccn => self.ccn,
            Indicator::MargineStruttura => self.margine_struttura,
            Indicator::CurrentRatio => self.current_ratio,
            Indicator::FixedAssetCoverage => self.fixed_asset_coverage,
            Indicator::FinancialIndependence => self.financial_independence,
            Indicator::Pfn => self.pfn,
            Indicator::PfnToEbitda => self.pfn_to_ebitda,
            Indicator::Roi => self.roi,
            Indicator::Roe => self.roe,
            Indicator::Ros => self.ros,
            Indicator::FinancialChargesToEbitda => self.financial_charges_to_ebitda,
        }
    }
}

/// Financial debt net of cash and marketable securities. Uses the detailed
/// lender breakdown when present, otherwise every debt line.
pub fn net_financial_position(balance: &BalanceSheetSnapshot) -> Money {
    let financial_debt = match &balance.debt_breakdown {
        Some(breakdown) => breakdown.total(),
        None => balance.debiti_breve + balance.debiti_lungo,
    };
    financial_debt - balance.disponibilita_liquide - balance.attivita_finanziarie
}

/// Derive the indicator battery from any statement pair. Zero denominators
/// yield zero ratios.
pub fn compute_indicators(
    balance: &BalanceSheetSnapshot,
    income: &IncomeStatementPeriod,
) -> IndicatorSet {
    let hundred = Decimal::ONE_HUNDRED;
    let r = reclassify(balance, income);
    let b = &r.balance;
    let i = &r.income;

    let revenue = income.ricavi_vendite;
    let financial_charges = income.oneri_finanziari;
    let current_liabilities = balance.debiti_breve;

    let pfn = net_financial_position(balance);

    IndicatorSet {
        dscr: safe_divide(i.ebitda - income.imposte, financial_charges),
        ebitda_margin: safe_divide(i.ebitda, revenue) * hundred,
        margine_tesoreria: b.margine_tesoreria,
        ccn: b.ccn,
        margine_struttura: b.margine_struttura,
        current_ratio: safe_divide(b.current_assets, current_liabilities),
        fixed_asset_coverage: safe_divide(b.equity + b.long_term_debt, b.fixed_assets) * hundred,
        financial_independence: safe_divide(b.equity, b.total_assets) * hundred,
        pfn,
        pfn_to_ebitda: safe_divide(pfn, i.ebitda),
        roi: safe_divide(i.ebit, b.total_assets) * hundred,
        roe: safe_divide(i.net_profit, b.equity) * hundred,
        ros: safe_divide(i.ebit, revenue) * hundred,
        financial_charges_to_ebitda: safe_divide(financial_charges, i.ebitda) * hundred,
        ebitda: i.ebitda,
        quick_ratio: safe_divide(b.current_assets - balance.rimanenze, current_liabilities),
        equity_to_fixed_assets: safe_divide(b.equity, b.fixed_assets) * hundred,
        financial_charges,
    }
}
