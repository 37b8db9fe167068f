//! Immutable lookup tables: line labels, alert definitions and sectors.
//!
//! Built once (built-in Italian tables or a JSON override) and passed by
//! reference into the operations that render labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reclassify::Aggregate;
use crate::statements::{BalanceSheetCode, IncomeStatementCode, LineCode};
use crate::BilancioResult;

/// One statutory early-warning criterion backing an extra-accounting alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDefinition {
    pub key: String,
    pub label: String,
    pub statutory_reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub balance_labels: BTreeMap<BalanceSheetCode, String>,
    pub income_labels: BTreeMap<IncomeStatementCode, String>,
    pub aggregate_labels: BTreeMap<Aggregate, String>,
    pub alerts: Vec<AlertDefinition>,
    pub sectors: Vec<String>,
}

impl ReferenceData {
    /// Parse an override document. Sections left out keep the built-in tables.
    pub fn from_json(json: &str) -> BilancioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn balance_label(&self, code: BalanceSheetCode) -> &str {
        self.balance_labels
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| code.key())
    }

    pub fn income_label(&self, code: IncomeStatementCode) -> &str {
        self.income_labels
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| code.key())
    }

    pub fn line_label(&self, code: LineCode) -> &str {
        match code {
            LineCode::Balance(c) => self.balance_label(c),
            LineCode::Income(c) => self.income_label(c),
        }
    }

    pub fn aggregate_label(&self, aggregate: Aggregate) -> &str {
        self.aggregate_labels
            .get(&aggregate)
            .map(String::as_str)
            .unwrap_or_else(|| aggregate.key())
    }

    pub fn alert(&self, key: &str) -> Option<&AlertDefinition> {
        self.alerts.iter().find(|a| a.key == key)
    }

    pub fn has_sector(&self, sector: &str) -> bool {
        self.sectors.iter().any(|s| s.eq_ignore_ascii_case(sector))
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        use BalanceSheetCode as Sp;
        use IncomeStatementCode as Ce;

        let balance_labels = [
            (Sp::CreditiSoci, "A) Crediti verso soci"),
            (Sp::ImmobImmateriali, "B.I Immobilizzazioni immateriali"),
            (Sp::ImmobMateriali, "B.II Immobilizzazioni materiali"),
            (Sp::ImmobFinanziarie, "B.III Immobilizzazioni finanziarie"),
            (Sp::Rimanenze, "C.I Rimanenze"),
            (Sp::CreditiBreve, "C.II Crediti esigibili entro l'esercizio"),
            (Sp::CreditiLungo, "C.II Crediti esigibili oltre l'esercizio"),
            (Sp::AttivitaFinanziarie, "C.III Attività finanziarie non immobilizzate"),
            (Sp::DisponibilitaLiquide, "C.IV Disponibilità liquide"),
            (Sp::RateiRiscontiAttivi, "D) Ratei e risconti attivi"),
            (Sp::Capitale, "A.I Capitale"),
            (Sp::Riserve, "A.II-VIII Riserve"),
            (Sp::UtilePerdita, "A.IX Utile (perdita) dell'esercizio"),
            (Sp::FondiRischi, "B) Fondi per rischi e oneri"),
            (Sp::Tfr, "C) Trattamento di fine rapporto"),
            (Sp::DebitiBreve, "D) Debiti esigibili entro l'esercizio"),
            (Sp::DebitiLungo, "D) Debiti esigibili oltre l'esercizio"),
            (Sp::RateiRiscontiPassivi, "E) Ratei e risconti passivi"),
        ];

        let income_labels = [
            (Ce::RicaviVendite, "A.1 Ricavi delle vendite e delle prestazioni"),
            (Ce::VariazioniRimanenze, "A.2-3 Variazioni delle rimanenze di prodotti"),
            (Ce::LavoriInterni, "A.4 Incrementi di immobilizzazioni per lavori interni"),
            (Ce::AltriRicavi, "A.5 Altri ricavi e proventi"),
            (Ce::MateriePrime, "B.6 Materie prime, sussidiarie e merci"),
            (Ce::Servizi, "B.7 Servizi"),
            (Ce::GodimentoBeni, "B.8 Godimento di beni di terzi"),
            (Ce::CostiPersonale, "B.9 Costi per il personale"),
            (Ce::Ammortamenti, "B.10 Ammortamenti e svalutazioni"),
            (Ce::VarRimanenzeMatPrime, "B.11 Variazioni rimanenze materie prime"),
            (Ce::Accantonamenti, "B.12 Accantonamenti per rischi"),
            (Ce::AltriAccantonamenti, "B.13 Altri accantonamenti"),
            (Ce::OneriDiversi, "B.14 Oneri diversi di gestione"),
            (Ce::ProventiPartecipazioni, "C.15 Proventi da partecipazioni"),
            (Ce::AltriProventiFinanziari, "C.16 Altri proventi finanziari"),
            (Ce::OneriFinanziari, "C.17 Interessi e altri oneri finanziari"),
            (Ce::UtiliPerditeCambi, "C.17-bis Utili e perdite su cambi"),
            (Ce::RettificheAttivitaFin, "D) Rettifiche di valore di attività finanziarie"),
            (Ce::ProventiStraordinari, "Proventi straordinari"),
            (Ce::OneriStraordinari, "Oneri straordinari"),
            (Ce::Imposte, "Imposte sul reddito dell'esercizio"),
        ];

        let aggregate_labels = [
            (Aggregate::ProductionValue, "Valore della produzione"),
            (Aggregate::ProductionCost, "Costi della produzione"),
            (Aggregate::Ebitda, "Margine operativo lordo (EBITDA)"),
            (Aggregate::Ebit, "Risultato operativo (EBIT)"),
            (Aggregate::FinancialResult, "Risultato della gestione finanziaria"),
            (Aggregate::ExtraordinaryResult, "Risultato della gestione straordinaria"),
            (Aggregate::ProfitBeforeTax, "Risultato prima delle imposte"),
            (Aggregate::NetProfit, "Utile (perdita) dell'esercizio"),
            (Aggregate::FixedAssets, "Totale immobilizzazioni"),
            (Aggregate::CurrentAssets, "Totale attivo circolante"),
            (Aggregate::TotalAssets, "Totale attivo"),
            (Aggregate::Equity, "Patrimonio netto"),
            (Aggregate::Funds, "Fondi e TFR"),
            (Aggregate::ShortTermDebt, "Debiti a breve"),
            (Aggregate::LongTermDebt, "Debiti a medio-lungo"),
            (Aggregate::TotalLiabilities, "Totale passività"),
            (Aggregate::TotalLiabilitiesAndEquity, "Totale passivo e netto"),
            (Aggregate::Ccn, "Capitale circolante netto"),
            (Aggregate::MargineTesoreria, "Margine di tesoreria"),
            (Aggregate::MargineStruttura, "Margine di struttura"),
        ];

        let alerts = [
            (
                "wage_arrears",
                "Debiti per retribuzioni scaduti da almeno 30 giorni",
                "D.Lgs. 14/2019 art. 3 c.4 lett. a)",
            ),
            (
                "supplier_arrears",
                "Debiti verso fornitori scaduti da almeno 90 giorni",
                "D.Lgs. 14/2019 art. 3 c.4 lett. b)",
            ),
            (
                "bank_exposure_arrears",
                "Esposizioni verso banche scadute da più di 60 giorni",
                "D.Lgs. 14/2019 art. 3 c.4 lett. c)",
            ),
            (
                "social_security_arrears",
                "Ritardo nei versamenti contributivi INPS",
                "D.Lgs. 14/2019 art. 25-novies c.1 lett. b)",
            ),
            (
                "inail_arrears",
                "Debiti per premi INAIL scaduti da oltre 90 giorni",
                "D.Lgs. 14/2019 art. 25-novies c.1 lett. c)",
            ),
            (
                "tax_collection_claims",
                "Crediti affidati all'agente della riscossione scaduti da oltre 90 giorni",
                "D.Lgs. 14/2019 art. 25-novies c.1 lett. d)",
            ),
            (
                "vat_arrears",
                "Debito IVA scaduto e non versato",
                "D.Lgs. 14/2019 art. 25-novies c.1 lett. a)",
            ),
        ];

        let sectors = [
            "Agricoltura",
            "Manifattura",
            "Costruzioni",
            "Commercio",
            "Trasporti e logistica",
            "Turismo e ristorazione",
            "Servizi alle imprese",
            "ICT",
            "Sanità",
        ];

        Self {
            balance_labels: balance_labels
                .into_iter()
                .map(|(c, l)| (c, l.to_string()))
                .collect(),
            income_labels: income_labels
                .into_iter()
                .map(|(c, l)| (c, l.to_string()))
                .collect(),
            aggregate_labels: aggregate_labels
                .into_iter()
                .map(|(a, l)| (a, l.to_string()))
                .collect(),
            alerts: alerts
                .into_iter()
                .map(|(key, label, reference)| AlertDefinition {
                    key: key.to_string(),
                    label: label.to_string(),
                    statutory_reference: reference.to_string(),
                })
                .collect(),
            sectors: sectors.into_iter().map(String::from).collect(),
        }
    }
}
