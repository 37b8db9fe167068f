use serde::{Deserialize, Serialize};

use crate::statements::{BalanceSheetSnapshot, IncomeStatementPeriod};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Value-added income statement aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeAggregates {
    pub production_value: Money,
    pub production_cost: Money,
    pub ebitda: Money,
    pub ebit: Money,
    pub financial_result: Money,
    pub extraordinary_result: Money,
    pub profit_before_tax: Money,
    pub net_profit: Money,
}

/// Financial balance-sheet aggregates and margins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceAggregates {
    pub fixed_assets: Money,
    pub current_assets: Money,
    pub total_assets: Money,
    pub equity: Money,
    pub funds: Money,
    pub short_term_debt: Money,
    pub long_term_debt: Money,
    pub total_liabilities: Money,
    pub total_liabilities_and_equity: Money,
    /// Capitale circolante netto
    pub ccn: Money,
    pub margine_tesoreria: Money,
    pub margine_struttura: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReclassifiedStatement {
    pub income: IncomeAggregates,
    pub balance: BalanceAggregates,
}

/// Every aggregate the reclassifier produces, addressable by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    ProductionValue,
    ProductionCost,
    Ebitda,
    Ebit,
    FinancialResult,
    ExtraordinaryResult,
    ProfitBeforeTax,
    NetProfit,
    FixedAssets,
    CurrentAssets,
    TotalAssets,
    Equity,
    Funds,
    ShortTermDebt,
    LongTermDebt,
    TotalLiabilities,
    TotalLiabilitiesAndEquity,
    Ccn,
    MargineTesoreria,
    MargineStruttura,
}

impl Aggregate {
    pub const INCOME: [Aggregate; 8] = [
        Self::ProductionValue,
        Self::ProductionCost,
        Self::Ebitda,
        Self::Ebit,
        Self::FinancialResult,
        Self::ExtraordinaryResult,
        Self::ProfitBeforeTax,
        Self::NetProfit,
    ];

    pub const BALANCE: [Aggregate; 12] = [
        Self::FixedAssets,
        Self::CurrentAssets,
        Self::TotalAssets,
        Self::Equity,
        Self::Funds,
        Self::ShortTermDebt,
        Self::LongTermDebt,
        Self::TotalLiabilities,
        Self::TotalLiabilitiesAndEquity,
        Self::Ccn,
        Self::MargineTesoreria,
        Self::MargineStruttura,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::ProductionValue => "production_value",
            Self::ProductionCost => "production_cost",
            Self::Ebitda => "ebitda",
            Self::Ebit => "ebit",
            Self::FinancialResult => "financial_result",
            Self::ExtraordinaryResult => "extraordinary_result",
            Self::ProfitBeforeTax => "profit_before_tax",
            Self::NetProfit => "net_profit",
            Self::FixedAssets => "fixed_assets",
            Self::CurrentAssets => "current_assets",
            Self::TotalAssets => "total_assets",
            Self::Equity => "equity",
            Self::Funds => "funds",
            Self::ShortTermDebt => "short_term_debt",
            Self::LongTermDebt => "long_term_debt",
            Self::TotalLiabilities => "total_liabilities",
            Self::TotalLiabilitiesAndEquity => "total_liabilities_and_equity",
            Self::Ccn => "ccn",
            Self::MargineTesoreria => "margine_tesoreria",
            Self::MargineStruttura => "margine_struttura",
        }
    }

    /// Human-readable formula over statement codes.
    pub fn formula(&self) -> &'static str {
        match self {
            Self::ProductionValue => "ce01+ce02+ce03+ce04",
            Self::ProductionCost => "ce05+ce06+ce07+ce08+ce10+ce11+ce11b+ce12",
            Self::Ebitda => "production_value-production_cost",
            Self::Ebit => "ebitda-ce09",
            Self::FinancialResult => "ce13+ce14+ce16-ce15",
            Self::ExtraordinaryResult => "ce18-ce19",
            Self::ProfitBeforeTax => "ebit+financial_result+ce17+extraordinary_result",
            Self::NetProfit => "profit_before_tax-ce20",
            Self::FixedAssets => "sp02+sp03+sp04",
            Self::CurrentAssets => "sp05+sp06+sp07+sp08+sp09+sp10",
            Self::TotalAssets => "sp01+fixed_assets+current_assets",
            Self::Equity => "sp11+sp12+sp13",
            Self::Funds => "sp14+sp15",
            Self::ShortTermDebt => "sp16",
            Self::LongTermDebt => "sp17",
            Self::TotalLiabilities => "sp14+sp15+sp16+sp17+sp18",
            Self::TotalLiabilitiesAndEquity => "equity+total_liabilities",
            Self::Ccn => "current_assets-sp16",
            Self::MargineTesoreria => "current_assets-sp05-sp16",
            Self::MargineStruttura => "equity-fixed_assets",
        }
    }

    pub fn value(&self, r: &ReclassifiedStatement) -> Money {
        let i = &r.income;
        let b = &r.balance;
        match self {
            Self::ProductionValue => i.production_value,
            Self::ProductionCost => i.production_cost,
            Self::Ebitda => i.ebitda,
            Self::Ebit => i.ebit,
            Self::FinancialResult => i.financial_result,
            Self::ExtraordinaryResult => i.extraordinary_result,
            Self::ProfitBeforeTax => i.profit_before_tax,
            Self::NetProfit => i.net_profit,
            Self::FixedAssets => b.fixed_assets,
            Self::CurrentAssets => b.current_assets,
            Self::TotalAssets => b.total_assets,
            Self::Equity => b.equity,
            Self::Funds => b.funds,
            Self::ShortTermDebt => b.short_term_debt,
            Self::LongTermDebt => b.long_term_debt,
            Self::TotalLiabilities => b.total_liabilities,
            Self::TotalLiabilitiesAndEquity => b.total_liabilities_and_equity,
            Self::Ccn => b.ccn,
            Self::MargineTesoreria => b.margine_tesoreria,
            Self::MargineStruttura => b.margine_struttura,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Map raw statement codes onto the standard aggregates.
pub fn reclassify(
    balance: &BalanceSheetSnapshot,
    income: &IncomeStatementPeriod,
) -> ReclassifiedStatement {
    ReclassifiedStatement {
        income: reclassify_income(income),
        balance: reclassify_balance(balance),
    }
}

pub fn reclassify_income(ce: &IncomeStatementPeriod) -> IncomeAggregates {
    let production_value =
        ce.ricavi_vendite + ce.variazioni_rimanenze + ce.lavori_interni + ce.altri_ricavi;
    let production_cost = ce.materie_prime
        + ce.servizi
        + ce.godimento_beni
        + ce.costi_personale
        + ce.var_rimanenze_mat_prime
        + ce.accantonamenti
        + ce.altri_accantonamenti
        + ce.oneri_diversi;
    let ebitda = production_value - production_cost;
    let ebit = ebitda - ce.ammortamenti;
    let financial_result = ce.proventi_partecipazioni + ce.altri_proventi_finanziari
        + ce.utili_perdite_cambi
        - ce.oneri_finanziari;
    let extraordinary_result = ce.proventi_straordinari - ce.oneri_straordinari;
    let profit_before_tax =
        ebit + financial_result + ce.rettifiche_attivita_fin + extraordinary_result;
    let net_profit = profit_before_tax - ce.imposte;

    IncomeAggregates {
        production_value,
        production_cost,
        ebitda,
        ebit,
        financial_result,
        extraordinary_result,
        profit_before_tax,
        net_profit,
    }
}

pub fn reclassify_balance(sp: &BalanceSheetSnapshot) -> BalanceAggregates {
    let fixed_assets = sp.immob_immateriali + sp.immob_materiali + sp.immob_finanziarie;
    let current_assets = sp.rimanenze
        + sp.crediti_breve
        + sp.crediti_lungo
        + sp.attivita_finanziarie
        + sp.disponibilita_liquide
        + sp.ratei_risconti_attivi;
    let total_assets = sp.crediti_soci + fixed_assets + current_assets;
    let equity = sp.capitale + sp.riserve + sp.utile_perdita;
    let funds = sp.fondi_rischi + sp.tfr;
    let total_liabilities = funds + sp.debiti_breve + sp.debiti_lungo + sp.ratei_risconti_passivi;
    let ccn = current_assets - sp.debiti_breve;

    BalanceAggregates {
        fixed_assets,
        current_assets,
        total_assets,
        equity,
        funds,
        short_term_debt: sp.debiti_breve,
        long_term_debt: sp.debiti_lungo,
        total_liabilities,
        total_liabilities_and_equity: equity + total_liabilities,
        ccn,
        margine_tesoreria: ccn - sp.rimanenze,
        margine_struttura: equity - fixed_assets,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_income() -> IncomeStatementPeriod {
        IncomeStatementPeriod {
            ricavi_vendite: dec!(1_000_000),
            variazioni_rimanenze: dec!(10_000),
            altri_ricavi: dec!(20_000),
            materie_prime: dec!(400_000),
            servizi: dec!(150_000),
            godimento_beni: dec!(30_000),
            costi_personale: dec!(250_000),
            ammortamenti: dec!(40_000),
            var_rimanenze_mat_prime: dec!(-5_000),
            accantonamenti: dec!(3_000),
            altri_accantonamenti: dec!(2_000),
            oneri_diversi: dec!(10_000),
            altri_proventi_finanziari: dec!(1_000),
            oneri_finanziari: dec!(20_000),
            utili_perdite_cambi: dec!(-500),
            rettifiche_attivita_fin: dec!(-1_500),
            proventi_straordinari: dec!(4_000),
            oneri_straordinari: dec!(1_000),
            imposte: dec!(30_000),
            ..Default::default()
        }
    }

    fn sample_balance() -> BalanceSheetSnapshot {
        BalanceSheetSnapshot {
            immob_immateriali: dec!(50_000),
            immob_materiali: dec!(300_000),
            immob_finanziarie: dec!(20_000),
            rimanenze: dec!(80_000),
            crediti_breve: dec!(150_000),
            disponibilita_liquide: dec!(40_000),
            ratei_risconti_attivi: dec!(5_000),
            capitale: dec!(100_000),
            riserve: dec!(120_000),
            utile_perdita: dec!(52_000),
            tfr: dec!(30_000),
            debiti_breve: dec!(200_000),
            debiti_lungo: dec!(140_000),
            ratei_risconti_passivi: dec!(3_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_income_aggregates() {
        let agg = reclassify_income(&sample_income());
        assert_eq!(agg.production_value, dec!(1_030_000));
        // 400 + 150 + 30 + 250 - 5 + 3 + 2 + 10 (thousands)
        assert_eq!(agg.production_cost, dec!(840_000));
        assert_eq!(agg.ebitda, dec!(190_000));
        assert_eq!(agg.ebit, dec!(150_000));
        assert_eq!(agg.financial_result, dec!(-19_500));
        assert_eq!(agg.extraordinary_result, dec!(3_000));
        assert_eq!(agg.profit_before_tax, dec!(132_000));
        assert_eq!(agg.net_profit, dec!(102_000));
    }

    #[test]
    fn test_balance_aggregates() {
        let agg = reclassify_balance(&sample_balance());
        assert_eq!(agg.fixed_assets, dec!(370_000));
        assert_eq!(agg.current_assets, dec!(275_000));
        assert_eq!(agg.total_assets, dec!(645_000));
        assert_eq!(agg.equity, dec!(272_000));
        assert_eq!(agg.funds, dec!(30_000));
        assert_eq!(agg.total_liabilities, dec!(373_000));
        assert_eq!(agg.total_liabilities_and_equity, dec!(645_000));
        assert_eq!(agg.ccn, dec!(75_000));
        assert_eq!(agg.margine_tesoreria, dec!(-5_000));
        assert_eq!(agg.margine_struttura, dec!(-98_000));
    }

    #[test]
    fn test_total_assets_matches_snapshot_total() {
        let bs = sample_balance();
        let agg = reclassify_balance(&bs);
        assert_eq!(agg.total_assets, bs.total_assets());
        assert_eq!(
            agg.total_liabilities_and_equity,
            bs.total_liabilities_and_equity()
        );
    }

    #[test]
    fn test_empty_statements_reclassify_to_zero() {
        let r = reclassify(
            &BalanceSheetSnapshot::default(),
            &IncomeStatementPeriod::default(),
        );
        assert_eq!(r, ReclassifiedStatement::default());
        assert_eq!(Aggregate::NetProfit.value(&r), Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_lookup_by_key() {
        let r = reclassify(&sample_balance(), &sample_income());
        assert_eq!(Aggregate::Ebitda.value(&r), dec!(190_000));
        assert_eq!(Aggregate::Equity.value(&r), dec!(272_000));
        assert_eq!(Aggregate::Ebit.formula(), "ebitda-ce09");
    }
}
