use serde::{Deserialize, Serialize};

use super::codes::{BalanceSheetCode as Sp, IncomeStatementCode as Ce, LineCode};
use super::snapshot::FinancialStatements;
use crate::reclassify::{Aggregate, ReclassifiedStatement};
use crate::reference::ReferenceData;
use crate::types::Money;

/// One presentation row. Headers carry no value, line items read a raw code,
/// subtotals read a reclassified aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementRow {
    Header {
        label: String,
    },
    LineItem {
        code: LineCode,
        label: String,
    },
    Subtotal {
        aggregate: Aggregate,
        label: String,
        formula: String,
    },
}

impl StatementRow {
    pub fn label(&self) -> &str {
        match self {
            StatementRow::Header { label }
            | StatementRow::LineItem { label, .. }
            | StatementRow::Subtotal { label, .. } => label,
        }
    }

    /// Value of the row for one column; `None` for headers.
    pub fn value(
        &self,
        statements: &FinancialStatements,
        reclassified: &ReclassifiedStatement,
    ) -> Option<Money> {
        match self {
            StatementRow::Header { .. } => None,
            StatementRow::LineItem { code, .. } => Some(match code {
                LineCode::Balance(c) => statements.balance.get(*c),
                LineCode::Income(c) => statements.income.get(*c),
            }),
            StatementRow::Subtotal { aggregate, .. } => Some(aggregate.value(reclassified)),
        }
    }
}

enum Entry {
    Header(&'static str),
    Line(LineCode),
    Total(Aggregate),
}

fn build(entries: &[Entry], rd: &ReferenceData) -> Vec<StatementRow> {
    entries
        .iter()
        .map(|e| match e {
            Entry::Header(label) => StatementRow::Header {
                label: (*label).to_string(),
            },
            Entry::Line(code) => StatementRow::LineItem {
                code: *code,
                label: rd.line_label(*code).to_string(),
            },
            Entry::Total(aggregate) => StatementRow::Subtotal {
                aggregate: *aggregate,
                label: rd.aggregate_label(*aggregate).to_string(),
                formula: aggregate.formula().to_string(),
            },
        })
        .collect()
}

fn ce(code: Ce) -> Entry {
    Entry::Line(LineCode::Income(code))
}

fn sp(code: Sp) -> Entry {
    Entry::Line(LineCode::Balance(code))
}

/// Value-added income statement in presentation order.
pub fn income_statement_layout(rd: &ReferenceData) -> Vec<StatementRow> {
    let entries = [
        Entry::Header("Conto economico"),
        ce(Ce::RicaviVendite),
        ce(Ce::VariazioniRimanenze),
        ce(Ce::LavoriInterni),
        ce(Ce::AltriRicavi),
        Entry::Total(Aggregate::ProductionValue),
        ce(Ce::MateriePrime),
        ce(Ce::Servizi),
        ce(Ce::GodimentoBeni),
        ce(Ce::CostiPersonale),
        ce(Ce::VarRimanenzeMatPrime),
        ce(Ce::Accantonamenti),
        ce(Ce::AltriAccantonamenti),
        ce(Ce::OneriDiversi),
        Entry::Total(Aggregate::ProductionCost),
        Entry::Total(Aggregate::Ebitda),
        ce(Ce::Ammortamenti),
        Entry::Total(Aggregate::Ebit),
        ce(Ce::ProventiPartecipazioni),
        ce(Ce::AltriProventiFinanziari),
        ce(Ce::OneriFinanziari),
        ce(Ce::UtiliPerditeCambi),
        Entry::Total(Aggregate::FinancialResult),
        ce(Ce::RettificheAttivitaFin),
        ce(Ce::ProventiStraordinari),
        ce(Ce::OneriStraordinari),
        Entry::Total(Aggregate::ExtraordinaryResult),
        Entry::Total(Aggregate::ProfitBeforeTax),
        ce(Ce::Imposte),
        Entry::Total(Aggregate::NetProfit),
    ];
    build(&entries, rd)
}

/// Financial balance sheet followed by the structural margins.
pub fn balance_sheet_layout(rd: &ReferenceData) -> Vec<StatementRow> {
    let entries = [
        Entry::Header("Attivo"),
        sp(Sp::CreditiSoci),
        sp(Sp::ImmobImmateriali),
        sp(Sp::ImmobMateriali),
        sp(Sp::ImmobFinanziarie),
        Entry::Total(Aggregate::FixedAssets),
        sp(Sp::Rimanenze),
        sp(Sp::CreditiBreve),
        sp(Sp::CreditiLungo),
        sp(Sp::AttivitaFinanziarie),
        sp(Sp::DisponibilitaLiquide),
        sp(Sp::RateiRiscontiAttivi),
        Entry::Total(Aggregate::CurrentAssets),
        Entry::Total(Aggregate::TotalAssets),
        Entry::Header("Passivo"),
        sp(Sp::Capitale),
        sp(Sp::Riserve),
        sp(Sp::UtilePerdita),
        Entry::Total(Aggregate::Equity),
        sp(Sp::FondiRischi),
        sp(Sp::Tfr),
        Entry::Total(Aggregate::Funds),
        sp(Sp::DebitiBreve),
        sp(Sp::DebitiLungo),
        sp(Sp::RateiRiscontiPassivi),
        Entry::Total(Aggregate::TotalLiabilities),
        Entry::Total(Aggregate::TotalLiabilitiesAndEquity),
        Entry::Header("Margini"),
        Entry::Total(Aggregate::Ccn),
        Entry::Total(Aggregate::MargineTesoreria),
        Entry::Total(Aggregate::MargineStruttura),
    ];
    build(&entries, rd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reclassify::reclassify;
    use rust_decimal_macros::dec;

    #[test]
    fn test_layouts_cover_every_line_once() {
        let rd = ReferenceData::default();
        let income_lines = income_statement_layout(&rd)
            .iter()
            .filter(|r| matches!(r, StatementRow::LineItem { .. }))
            .count();
        let balance_lines = balance_sheet_layout(&rd)
            .iter()
            .filter(|r| matches!(r, StatementRow::LineItem { .. }))
            .count();
        assert_eq!(income_lines, Ce::ALL.len());
        assert_eq!(balance_lines, Sp::ALL.len());
    }

    #[test]
    fn test_row_values() {
        let rd = ReferenceData::default();
        let mut fs = FinancialStatements::default();
        fs.income.ricavi_vendite = dec!(100);
        fs.income.servizi = dec!(40);
        let r = reclassify(&fs.balance, &fs.income);
        let rows = income_statement_layout(&rd);

        assert_eq!(rows[0].value(&fs, &r), None);
        assert_eq!(rows[1].value(&fs, &r), Some(dec!(100)));
        let ebitda = rows
            .iter()
            .find(|row| {
                matches!(
                    row,
                    StatementRow::Subtotal {
                        aggregate: Aggregate::Ebitda,
                        ..
                    }
                )
            })
            .unwrap();
        assert_eq!(ebitda.value(&fs, &r), Some(dec!(60)));
        assert_eq!(ebitda.label(), "Margine operativo lordo (EBITDA)");
    }
}
