use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::{BalanceSheetCode, BalanceSide, IncomeStatementCode};
use crate::error::BilancioError;
use crate::types::{Money, BALANCE_TOLERANCE, MONTHS_IN_YEAR};
use crate::BilancioResult;

// ---------------------------------------------------------------------------
// Balance sheet
// ---------------------------------------------------------------------------

/// Optional split of the debt lines by lender, used to isolate financial
/// debt from trade payables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtBreakdown {
    pub banche_breve: Money,
    pub banche_lungo: Money,
    pub altri_finanziatori_breve: Money,
    pub altri_finanziatori_lungo: Money,
    pub obbligazioni_breve: Money,
    pub obbligazioni_lungo: Money,
}

impl DebtBreakdown {
    pub fn short_term(&self) -> Money {
        self.banche_breve + self.altri_finanziatori_breve + self.obbligazioni_breve
    }

    pub fn long_term(&self) -> Money {
        self.banche_lungo + self.altri_finanziatori_lungo + self.obbligazioni_lungo
    }

    pub fn total(&self) -> Money {
        self.short_term() + self.long_term()
    }
}

/// Point-in-time balance sheet. Absent codes deserialize as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheetSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(alias = "sp01")]
    pub crediti_soci: Money,
    #[serde(alias = "sp02")]
    pub immob_immateriali: Money,
    #[serde(alias = "sp03")]
    pub immob_materiali: Money,
    #[serde(alias = "sp04")]
    pub immob_finanziarie: Money,
    #[serde(alias = "sp05")]
    pub rimanenze: Money,
    #[serde(alias = "sp06")]
    pub crediti_breve: Money,
    #[serde(alias = "sp07")]
    pub crediti_lungo: Money,
    #[serde(alias = "sp08")]
    pub attivita_finanziarie: Money,
    #[serde(alias = "sp09")]
    pub disponibilita_liquide: Money,
    #[serde(alias = "sp10")]
    pub ratei_risconti_attivi: Money,
    #[serde(alias = "sp11")]
    pub capitale: Money,
    #[serde(alias = "sp12")]
    pub riserve: Money,
    #[serde(alias = "sp13")]
    pub utile_perdita: Money,
    #[serde(alias = "sp14")]
    pub fondi_rischi: Money,
    #[serde(alias = "sp15")]
    pub tfr: Money,
    #[serde(alias = "sp16")]
    pub debiti_breve: Money,
    #[serde(alias = "sp17")]
    pub debiti_lungo: Money,
    #[serde(alias = "sp18")]
    pub ratei_risconti_passivi: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_breakdown: Option<DebtBreakdown>,
}

impl BalanceSheetSnapshot {
    pub fn get(&self, code: BalanceSheetCode) -> Money {
        match code {
            BalanceSheetCode::CreditiSoci => self.crediti_soci,
            BalanceSheetCode::ImmobImmateriali => self.immob_immateriali,
            BalanceSheetCode::ImmobMateriali => self.immob_materiali,
            BalanceSheetCode::ImmobFinanziarie => self.immob_finanziarie,
            BalanceSheetCode::Rimanenze => self.rimanenze,
            BalanceSheetCode::CreditiBreve => self.crediti_breve,
            BalanceSheetCode::CreditiLungo => self.crediti_lungo,
            BalanceSheetCode::AttivitaFinanziarie => self.attivita_finanziarie,
            BalanceSheetCode::DisponibilitaLiquide => self.disponibilita_liquide,
            BalanceSheetCode::RateiRiscontiAttivi => self.ratei_risconti_attivi,
            BalanceSheetCode::Capitale => self.capitale,
            BalanceSheetCode::Riserve => self.riserve,
            BalanceSheetCode::UtilePerdita => self.utile_perdita,
            BalanceSheetCode::FondiRischi => self.fondi_rischi,
            BalanceSheetCode::Tfr => self.tfr,
            BalanceSheetCode::DebitiBreve => self.debiti_breve,
            BalanceSheetCode::DebitiLungo => self.debiti_lungo,
            BalanceSheetCode::RateiRiscontiPassivi => self.ratei_risconti_passivi,
        }
    }

    pub fn set(&mut self, code: BalanceSheetCode, value: Money) {
        let slot = match code {
            BalanceSheetCode::CreditiSoci => &mut self.crediti_soci,
            BalanceSheetCode::ImmobImmateriali => &mut self.immob_immateriali,
            BalanceSheetCode::ImmobMateriali => &mut self.immob_materiali,
            BalanceSheetCode::ImmobFinanziarie => &mut self.immob_finanziarie,
            BalanceSheetCode::Rimanenze => &mut self.rimanenze,
            BalanceSheetCode::CreditiBreve => &mut self.crediti_breve,
            BalanceSheetCode::CreditiLungo => &mut self.crediti_lungo,
            BalanceSheetCode::AttivitaFinanziarie => &mut self.attivita_finanziarie,
            BalanceSheetCode::DisponibilitaLiquide => &mut self.disponibilita_liquide,
            BalanceSheetCode::RateiRiscontiAttivi => &mut self.ratei_risconti_attivi,
            BalanceSheetCode::Capitale => &mut self.capitale,
            BalanceSheetCode::Riserve => &mut self.riserve,
            BalanceSheetCode::UtilePerdita => &mut self.utile_perdita,
            BalanceSheetCode::FondiRischi => &mut self.fondi_rischi,
            BalanceSheetCode::Tfr => &mut self.tfr,
            BalanceSheetCode::DebitiBreve => &mut self.debiti_breve,
            BalanceSheetCode::DebitiLungo => &mut self.debiti_lungo,
            BalanceSheetCode::RateiRiscontiPassivi => &mut self.ratei_risconti_passivi,
        };
        *slot = value;
    }

    fn side_total(&self, side: BalanceSide) -> Money {
        BalanceSheetCode::ALL
            .iter()
            .filter(|c| c.side() == side)
            .map(|c| self.get(*c))
            .sum()
    }

    pub fn total_assets(&self) -> Money {
        self.side_total(BalanceSide::Asset)
    }

    pub fn total_liabilities_and_equity(&self) -> Money {
        self.side_total(BalanceSide::LiabilityOrEquity)
    }

    /// Assets minus liabilities and equity; zero for a balanced snapshot.
    pub fn imbalance(&self) -> Money {
        self.total_assets() - self.total_liabilities_and_equity()
    }

    pub fn is_balanced(&self) -> bool {
        self.imbalance().abs() <= BALANCE_TOLERANCE
    }
}

// ---------------------------------------------------------------------------
// Income statement
// ---------------------------------------------------------------------------

/// Flow statement covering `period_months` months. Absent codes deserialize
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatementPeriod {
    pub period_months: u32,
    #[serde(alias = "ce01")]
    pub ricavi_vendite: Money,
    #[serde(alias = "ce02")]
    pub variazioni_rimanenze: Money,
    #[serde(alias = "ce03")]
    pub lavori_interni: Money,
    #[serde(alias = "ce04")]
    pub altri_ricavi: Money,
    #[serde(alias = "ce05")]
    pub materie_prime: Money,
    #[serde(alias = "ce06")]
    pub servizi: Money,
    #[serde(alias = "ce07")]
    pub godimento_beni: Money,
    #[serde(alias = "ce08")]
    pub costi_personale: Money,
    #[serde(alias = "ce09")]
    pub ammortamenti: Money,
    #[serde(alias = "ce10")]
    pub var_rimanenze_mat_prime: Money,
    #[serde(alias = "ce11")]
    pub accantonamenti: Money,
    #[serde(alias = "ce11b")]
    pub altri_accantonamenti: Money,
    #[serde(alias = "ce12")]
    pub oneri_diversi: Money,
    #[serde(alias = "ce13")]
    pub proventi_partecipazioni: Money,
    #[serde(alias = "ce14")]
    pub altri_proventi_finanziari: Money,
    #[serde(alias = "ce15")]
    pub oneri_finanziari: Money,
    #[serde(alias = "ce16")]
    pub utili_perdite_cambi: Money,
    #[serde(alias = "ce17")]
    pub rettifiche_attivita_fin: Money,
    #[serde(alias = "ce18")]
    pub proventi_straordinari: Money,
    #[serde(alias = "ce19")]
    pub oneri_straordinari: Money,
    #[serde(alias = "ce20")]
    pub imposte: Money,
}

impl Default for IncomeStatementPeriod {
    fn default() -> Self {
        Self {
            period_months: MONTHS_IN_YEAR,
            ricavi_vendite: Decimal::ZERO,
            variazioni_rimanenze: Decimal::ZERO,
            lavori_interni: Decimal::ZERO,
            altri_ricavi: Decimal::ZERO,
            materie_prime: Decimal::ZERO,
            servizi: Decimal::ZERO,
            godimento_beni: Decimal::ZERO,
            costi_personale: Decimal::ZERO,
            ammortamenti: Decimal::ZERO,
            var_rimanenze_mat_prime: Decimal::ZERO,
            accantonamenti: Decimal::ZERO,
            altri_accantonamenti: Decimal::ZERO,
            oneri_diversi: Decimal::ZERO,
            proventi_partecipazioni: Decimal::ZERO,
            altri_proventi_finanziari: Decimal::ZERO,
            oneri_finanziari: Decimal::ZERO,
            utili_perdite_cambi: Decimal::ZERO,
            rettifiche_attivita_fin: Decimal::ZERO,
            proventi_straordinari: Decimal::ZERO,
            oneri_straordinari: Decimal::ZERO,
            imposte: Decimal::ZERO,
        }
    }
}

impl IncomeStatementPeriod {
    pub fn get(&self, code: IncomeStatementCode) -> Money {
        match code {
            IncomeStatementCode::RicaviVendite => self.ricavi_vendite,
            IncomeStatementCode::VariazioniRimanenze => self.variazioni_rimanenze,
            IncomeStatementCode::LavoriInterni => self.lavori_interni,
            IncomeStatementCode::AltriRicavi => self.altri_ricavi,
            IncomeStatementCode::MateriePrime => self.materie_prime,
            IncomeStatementCode::Servizi => self.servizi,
            IncomeStatementCode::GodimentoBeni => self.godimento_beni,
            IncomeStatementCode::CostiPersonale => self.costi_personale,
            IncomeStatementCode::Ammortamenti => self.ammortamenti,
            IncomeStatementCode::VarRimanenzeMatPrime => self.var_rimanenze_mat_prime,
            IncomeStatementCode::Accantonamenti => self.accantonamenti,
            IncomeStatementCode::AltriAccantonamenti => self.altri_accantonamenti,
            IncomeStatementCode::OneriDiversi => self.oneri_diversi,
            IncomeStatementCode::ProventiPartecipazioni => self.proventi_partecipazioni,
            IncomeStatementCode::AltriProventiFinanziari => self.altri_proventi_finanziari,
            IncomeStatementCode::OneriFinanziari => self.oneri_finanziari,
            IncomeStatementCode::UtiliPerditeCambi => self.utili_perdite_cambi,
            IncomeStatementCode::RettificheAttivitaFin => self.rettifiche_attivita_fin,
            IncomeStatementCode::ProventiStraordinari => self.proventi_straordinari,
            IncomeStatementCode::OneriStraordinari => self.oneri_straordinari,
            IncomeStatementCode::Imposte => self.imposte,
        }
    }

    pub fn set(&mut self, code: IncomeStatementCode, value: Money) {
        let slot = match code {
            IncomeStatementCode::RicaviVendite => &mut self.ricavi_vendite,
            IncomeStatementCode::VariazioniRimanenze => &mut self.variazioni_rimanenze,
            IncomeStatementCode::LavoriInterni => &mut self.lavori_interni,
            IncomeStatementCode::AltriRicavi => &mut self.altri_ricavi,
            IncomeStatementCode::MateriePrime => &mut self.materie_prime,
            IncomeStatementCode::Servizi => &mut self.servizi,
            IncomeStatementCode::GodimentoBeni => &mut self.godimento_beni,
            IncomeStatementCode::CostiPersonale => &mut self.costi_personale,
            IncomeStatementCode::Ammortamenti => &mut self.ammortamenti,
            IncomeStatementCode::VarRimanenzeMatPrime => &mut self.var_rimanenze_mat_prime,
            IncomeStatementCode::Accantonamenti => &mut self.accantonamenti,
            IncomeStatementCode::AltriAccantonamenti => &mut self.altri_accantonamenti,
            IncomeStatementCode::OneriDiversi => &mut self.oneri_diversi,
            IncomeStatementCode::ProventiPartecipazioni => &mut self.proventi_partecipazioni,
            IncomeStatementCode::AltriProventiFinanziari => &mut self.altri_proventi_finanziari,
            IncomeStatementCode::OneriFinanziari => &mut self.oneri_finanziari,
            IncomeStatementCode::UtiliPerditeCambi => &mut self.utili_perdite_cambi,
            IncomeStatementCode::RettificheAttivitaFin => &mut self.rettifiche_attivita_fin,
            IncomeStatementCode::ProventiStraordinari => &mut self.proventi_straordinari,
            IncomeStatementCode::OneriStraordinari => &mut self.oneri_straordinari,
            IncomeStatementCode::Imposte => &mut self.imposte,
        };
        *slot = value;
    }

    pub fn validate(&self) -> BilancioResult<()> {
        validate_period_months("period_months", self.period_months)
    }
}

pub(crate) fn validate_period_months(field: &str, months: u32) -> BilancioResult<()> {
    if months == 0 || months > MONTHS_IN_YEAR {
        return Err(BilancioError::InvalidInput {
            field: field.into(),
            reason: format!("Period must cover 1 to 12 months, got {months}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Statement pair
// ---------------------------------------------------------------------------

/// Balance sheet and income statement of one fiscal column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub balance: BalanceSheetSnapshot,
    #[serde(default)]
    pub income: IncomeStatementPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_codes_default_to_zero() {
        let bs: BalanceSheetSnapshot =
            serde_json::from_str(r#"{"sp09": "100", "capitale": "100"}"#).unwrap();
        assert_eq!(bs.disponibilita_liquide, dec!(100));
        assert_eq!(bs.rimanenze, Decimal::ZERO);
        assert!(bs.is_balanced());

        let is: IncomeStatementPeriod = serde_json::from_str(r#"{"ce01": 500}"#).unwrap();
        assert_eq!(is.period_months, 12);
        assert_eq!(is.ricavi_vendite, dec!(500));
    }

    #[test]
    fn test_get_set_round_trip_every_code() {
        let mut bs = BalanceSheetSnapshot::default();
        for (i, code) in BalanceSheetCode::ALL.iter().enumerate() {
            bs.set(*code, Decimal::from(i as u32 + 1));
        }
        for (i, code) in BalanceSheetCode::ALL.iter().enumerate() {
            assert_eq!(bs.get(*code), Decimal::from(i as u32 + 1));
        }
        // assets 1..=10 = 55, liabilities 11..=18 = 116
        assert_eq!(bs.total_assets(), dec!(55));
        assert_eq!(bs.total_liabilities_and_equity(), dec!(116));
        assert_eq!(bs.imbalance(), dec!(-61));
    }

    #[test]
    fn test_period_months_validation() {
        let mut is = IncomeStatementPeriod::default();
        assert!(is.validate().is_ok());
        is.period_months = 0;
        assert!(is.validate().is_err());
        is.period_months = 13;
        assert!(is.validate().is_err());
    }

    #[test]
    fn test_debt_breakdown_totals() {
        let d = DebtBreakdown {
            banche_breve: dec!(10),
            banche_lungo: dec!(20),
            obbligazioni_lungo: dec!(5),
            ..Default::default()
        };
        assert_eq!(d.short_term(), dec!(10));
        assert_eq!(d.long_term(), dec!(25));
        assert_eq!(d.total(), dec!(35));
    }
}
