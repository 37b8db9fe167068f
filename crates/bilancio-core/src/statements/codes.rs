use serde::{Deserialize, Serialize};

/// Side of the balance sheet a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSide {
    Asset,
    LiabilityOrEquity,
}

/// Balance-sheet lines sp01..sp18 of the abbreviated Italian-GAAP layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BalanceSheetCode {
    #[serde(rename = "crediti_soci", alias = "sp01")]
    CreditiSoci,
    #[serde(rename = "immob_immateriali", alias = "sp02")]
    ImmobImmateriali,
    #[serde(rename = "immob_materiali", alias = "sp03")]
    ImmobMateriali,
    #[serde(rename = "immob_finanziarie", alias = "sp04")]
    ImmobFinanziarie,
    #[serde(rename = "rimanenze", alias = "sp05")]
    Rimanenze,
    #[serde(rename = "crediti_breve", alias = "sp06")]
    CreditiBreve,
    #[serde(rename = "crediti_lungo", alias = "sp07")]
    CreditiLungo,
    #[serde(rename = "attivita_finanziarie", alias = "sp08")]
    AttivitaFinanziarie,
    #[serde(rename = "disponibilita_liquide", alias = "sp09")]
    DisponibilitaLiquide,
    #[serde(rename = "ratei_risconti_attivi", alias = "sp10")]
    RateiRiscontiAttivi,
    #[serde(rename = "capitale", alias = "sp11")]
    Capitale,
    #[serde(rename = "riserve", alias = "sp12")]
    Riserve,
    #[serde(rename = "utile_perdita", alias = "sp13")]
    UtilePerdita,
    #[serde(rename = "fondi_rischi", alias = "sp14")]
    FondiRischi,
    #[serde(rename = "tfr", alias = "sp15")]
    Tfr,
    #[serde(rename = "debiti_breve", alias = "sp16")]
    DebitiBreve,
    #[serde(rename = "debiti_lungo", alias = "sp17")]
    DebitiLungo,
    #[serde(rename = "ratei_risconti_passivi", alias = "sp18")]
    RateiRiscontiPassivi,
}

impl BalanceSheetCode {
    pub const ALL: [BalanceSheetCode; 18] = [
        Self::CreditiSoci,
        Self::ImmobImmateriali,
        Self::ImmobMateriali,
        Self::ImmobFinanziarie,
        Self::Rimanenze,
        Self::CreditiBreve,
        Self::CreditiLungo,
        Self::AttivitaFinanziarie,
        Self::DisponibilitaLiquide,
        Self::RateiRiscontiAttivi,
        Self::Capitale,
        Self::Riserve,
        Self::UtilePerdita,
        Self::FondiRischi,
        Self::Tfr,
        Self::DebitiBreve,
        Self::DebitiLungo,
        Self::RateiRiscontiPassivi,
    ];

    /// Short chart-of-accounts code, e.g. `sp05`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreditiSoci => "sp01",
            Self::ImmobImmateriali => "sp02",
            Self::ImmobMateriali => "sp03",
            Self::ImmobFinanziarie => "sp04",
            Self::Rimanenze => "sp05",
            Self::CreditiBreve => "sp06",
            Self::CreditiLungo => "sp07",
            Self::AttivitaFinanziarie => "sp08",
            Self::DisponibilitaLiquide => "sp09",
            Self::RateiRiscontiAttivi => "sp10",
            Self::Capitale => "sp11",
            Self::Riserve => "sp12",
            Self::UtilePerdita => "sp13",
            Self::FondiRischi => "sp14",
            Self::Tfr => "sp15",
            Self::DebitiBreve => "sp16",
            Self::DebitiLungo => "sp17",
            Self::RateiRiscontiPassivi => "sp18",
        }
    }

    /// Field key used in input documents, e.g. `rimanenze`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreditiSoci => "crediti_soci",
            Self::ImmobImmateriali => "immob_immateriali",
            Self::ImmobMateriali => "immob_materiali",
            Self::ImmobFinanziarie => "immob_finanziarie",
            Self::Rimanenze => "rimanenze",
            Self::CreditiBreve => "crediti_breve",
            Self::CreditiLungo => "crediti_lungo",
            Self::AttivitaFinanziarie => "attivita_finanziarie",
            Self::DisponibilitaLiquide => "disponibilita_liquide",
            Self::RateiRiscontiAttivi => "ratei_risconti_attivi",
            Self::Capitale => "capitale",
            Self::Riserve => "riserve",
            Self::UtilePerdita => "utile_perdita",
            Self::FondiRischi => "fondi_rischi",
            Self::Tfr => "tfr",
            Self::DebitiBreve => "debiti_breve",
            Self::DebitiLungo => "debiti_lungo",
            Self::RateiRiscontiPassivi => "ratei_risconti_passivi",
        }
    }

    pub fn side(&self) -> BalanceSide {
        match self {
            Self::CreditiSoci
            | Self::ImmobImmateriali
            | Self::ImmobMateriali
            | Self::ImmobFinanziarie
            | Self::Rimanenze
            | Self::CreditiBreve
            | Self::CreditiLungo
            | Self::AttivitaFinanziarie
            | Self::DisponibilitaLiquide
            | Self::RateiRiscontiAttivi => BalanceSide::Asset,
            _ => BalanceSide::LiabilityOrEquity,
        }
    }
}

/// Income-statement lines ce01..ce20. `ce11` is split into provisions and
/// other provisions (`ce11b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeStatementCode {
    #[serde(rename = "ricavi_vendite", alias = "ce01")]
    RicaviVendite,
    #[serde(rename = "variazioni_rimanenze", alias = "ce02")]
    VariazioniRimanenze,
    #[serde(rename = "lavori_interni", alias = "ce03")]
    LavoriInterni,
    #[serde(rename = "altri_ricavi", alias = "ce04")]
    AltriRicavi,
    #[serde(rename = "materie_prime", alias = "ce05")]
    MateriePrime,
    #[serde(rename = "servizi", alias = "ce06")]
    Servizi,
    #[serde(rename = "godimento_beni", alias = "ce07")]
    GodimentoBeni,
    #[serde(rename = "costi_personale", alias = "ce08")]
    CostiPersonale,
    #[serde(rename = "ammortamenti", alias = "ce09")]
    Ammortamenti,
    #[serde(rename = "var_rimanenze_mat_prime", alias = "ce10")]
    VarRimanenzeMatPrime,
    #[serde(rename = "accantonamenti", alias = "ce11")]
    Accantonamenti,
    #[serde(rename = "altri_accantonamenti", alias = "ce11b")]
    AltriAccantonamenti,
    #[serde(rename = "oneri_diversi", alias = "ce12")]
    OneriDiversi,
    #[serde(rename = "proventi_partecipazioni", alias = "ce13")]
    ProventiPartecipazioni,
    #[serde(rename = "altri_proventi_finanziari", alias = "ce14")]
    AltriProventiFinanziari,
    #[serde(rename = "oneri_finanziari", alias = "ce15")]
    OneriFinanziari,
    #[serde(rename = "utili_perdite_cambi", alias = "ce16")]
    UtiliPerditeCambi,
    #[serde(rename = "rettifiche_attivita_fin", alias = "ce17")]
    RettificheAttivitaFin,
    #[serde(rename = "proventi_straordinari", alias = "ce18")]
    ProventiStraordinari,
    #[serde(rename = "oneri_straordinari", alias = "ce19")]
    OneriStraordinari,
    #[serde(rename = "imposte", alias = "ce20")]
    Imposte,
}

impl IncomeStatementCode {
    pub const ALL: [IncomeStatementCode; 21] = [
        Self::RicaviVendite,
        Self::VariazioniRimanenze,
        Self::LavoriInterni,
        Self::AltriRicavi,
        Self::MateriePrime,
        Self::Servizi,
        Self::GodimentoBeni,
        Self::CostiPersonale,
        Self::Ammortamenti,
        Self::VarRimanenzeMatPrime,
        Self::Accantonamenti,
        Self::AltriAccantonamenti,
        Self::OneriDiversi,
        Self::ProventiPartecipazioni,
        Self::AltriProventiFinanziari,
        Self::OneriFinanziari,
        Self::UtiliPerditeCambi,
        Self::RettificheAttivitaFin,
        Self::ProventiStraordinari,
        Self::OneriStraordinari,
        Self::Imposte,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::RicaviVendite => "ce01",
            Self::VariazioniRimanenze => "ce02",
            Self::LavoriInterni => "ce03",
            Self::AltriRicavi => "ce04",
            Self::MateriePrime => "ce05",
            Self::Servizi => "ce06",
            Self::GodimentoBeni => "ce07",
            Self::CostiPersonale => "ce08",
            Self::Ammortamenti => "ce09",
            Self::VarRimanenzeMatPrime => "ce10",
            Self::Accantonamenti => "ce11",
            Self::AltriAccantonamenti => "ce11b",
            Self::OneriDiversi => "ce12",
            Self::ProventiPartecipazioni => "ce13",
            Self::AltriProventiFinanziari => "ce14",
            Self::OneriFinanziari => "ce15",
            Self::UtiliPerditeCambi => "ce16",
            Self::RettificheAttivitaFin => "ce17",
            Self::ProventiStraordinari => "ce18",
            Self::OneriStraordinari => "ce19",
            Self::Imposte => "ce20",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::RicaviVendite => "ricavi_vendite",
            Self::VariazioniRimanenze => "variazioni_rimanenze",
            Self::LavoriInterni => "lavori_interni",
            Self::AltriRicavi => "altri_ricavi",
            Self::MateriePrime => "materie_prime",
            Self::Servizi => "servizi",
            Self::GodimentoBeni => "godimento_beni",
            Self::CostiPersonale => "costi_personale",
            Self::Ammortamenti => "ammortamenti",
            Self::VarRimanenzeMatPrime => "var_rimanenze_mat_prime",
            Self::Accantonamenti => "accantonamenti",
            Self::AltriAccantonamenti => "altri_accantonamenti",
            Self::OneriDiversi => "oneri_diversi",
            Self::ProventiPartecipazioni => "proventi_partecipazioni",
            Self::AltriProventiFinanziari => "altri_proventi_finanziari",
            Self::OneriFinanziari => "oneri_finanziari",
            Self::UtiliPerditeCambi => "utili_perdite_cambi",
            Self::RettificheAttivitaFin => "rettifiche_attivita_fin",
            Self::ProventiStraordinari => "proventi_straordinari",
            Self::OneriStraordinari => "oneri_straordinari",
            Self::Imposte => "imposte",
        }
    }
}

/// A line item from either statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "statement", content = "code", rename_all = "snake_case")]
pub enum LineCode {
    Balance(BalanceSheetCode),
    Income(IncomeStatementCode),
}

impl LineCode {
    pub fn code(&self) -> &'static str {
        match self {
            LineCode::Balance(c) => c.code(),
            LineCode::Income(c) => c.code(),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            LineCode::Balance(c) => c.key(),
            LineCode::Income(c) => c.key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_codes_are_ordered_and_split() {
        let assets = BalanceSheetCode::ALL
            .iter()
            .filter(|c| c.side() == BalanceSide::Asset)
            .count();
        assert_eq!(assets, 10);
        assert_eq!(BalanceSheetCode::ALL[0].code(), "sp01");
        assert_eq!(BalanceSheetCode::ALL[17].code(), "sp18");
    }

    #[test]
    fn test_income_code_alias_deserializes() {
        let code: IncomeStatementCode = serde_json::from_str("\"ce11b\"").unwrap();
        assert_eq!(code, IncomeStatementCode::AltriAccantonamenti);
        let code: BalanceSheetCode = serde_json::from_str("\"rimanenze\"").unwrap();
        assert_eq!(code.code(), "sp05");
    }
}
