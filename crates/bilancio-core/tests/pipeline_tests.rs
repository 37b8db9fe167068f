use bilancio_core::annualize::annualize;
use bilancio_core::crisis::{classify_crisis, evaluate_crisis, CrisisRating, ExtraAccountingAlert};
use bilancio_core::indicators::{compute_indicators, score_indicators, Indicator};
use bilancio_core::projection::{project, project_multi_year, GrowthAssumption};
use bilancio_core::reclassify::reclassify;
use bilancio_core::reference::ReferenceData;
use bilancio_core::statements::{FinancialStatements, IncomeStatementCode};
use bilancio_core::{BilancioError, BALANCE_TOLERANCE};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

const REFERENCE_JSON: &str = r#"{
    "label": "2023",
    "balance": {
        "sp03": "420000",
        "sp05": "90000",
        "sp06": "250000",
        "sp08": "10000",
        "sp09": "30000",
        "sp11": "100000",
        "sp12": "150000",
        "sp13": "45000",
        "sp15": "35000",
        "sp16": "300000",
        "sp17": "170000"
    },
    "income": {
        "period_months": 12,
        "ce01": "1500000",
        "ce04": "20000",
        "ce05": "600000",
        "ce06": "380000",
        "ce07": "40000",
        "ce08": "310000",
        "ce09": "60000",
        "ce12": "15000",
        "ce15": "25000",
        "ce20": "45000"
    }
}"#;

fn reference_year() -> FinancialStatements {
    serde_json::from_str(REFERENCE_JSON).unwrap()
}

fn nine_months() -> FinancialStatements {
    let mut fs = reference_year();
    fs.label = Some("2024".into());
    fs.income.period_months = 9;
    fs.income.ricavi_vendite = dec!(1_200_000);
    fs.income.materie_prime = dec!(480_000);
    fs.income.servizi = dec!(300_000);
    fs.income.costi_personale = dec!(240_000);
    fs.balance.crediti_breve = dec!(280_000);
    fs.balance.disponibilita_liquide = dec!(0);
    fs
}

// ===========================================================================
// Statement input
// ===========================================================================

#[test]
fn test_coded_statement_round_trips_through_aggregates() {
    let fs = reference_year();
    assert!(fs.balance.is_balanced());

    let r = reclassify(&fs.balance, &fs.income);
    // 1.52M - (600+380+40+310+15)k
    assert_eq!(r.income.ebitda, dec!(175_000));
    assert_eq!(r.income.ebit, dec!(115_000));
    assert_eq!(r.income.profit_before_tax, dec!(90_000));
    assert_eq!(r.income.net_profit, dec!(45_000));
    assert_eq!(r.balance.total_assets, dec!(800_000));
    assert_eq!(r.balance.equity, dec!(295_000));
}

// ===========================================================================
// Annualize -> project -> score -> classify
// ===========================================================================

#[test]
fn test_nine_month_actual_annualized() {
    let result = annualize(&nine_months(), 9, &reference_year()).unwrap();
    let income = &result.result.statements.income;
    assert_eq!(income.ricavi_vendite, dec!(1_600_000));
    assert_eq!(income.materie_prime, dec!(640_000));
    assert_eq!(result.result.statements.balance, nine_months().balance);
}

#[test]
fn test_projection_from_partial_year_balances() {
    let reference = reference_year();
    let partial = nine_months();
    let assumptions = GrowthAssumption {
        forecast_year: 2025,
        revenue_growth_pct: Some(dec!(8)),
        materials_growth_pct: Some(dec!(3)),
        materials_fixed_share_pct: Some(dec!(40)),
        personnel_growth_pct: Some(dec!(4)),
        tax_rate_pct: Some(dec!(27.9)),
        depreciation_rate_pct: Some(dec!(12)),
        investments: dec!(80_000),
        ..Default::default()
    };

    let result = project(&reference, &partial, &assumptions).unwrap();
    let out = &result.result;
    let bs = &out.balance.snapshot;

    assert!((bs.total_assets() - bs.total_liabilities_and_equity()).abs() <= BALANCE_TOLERANCE);
    assert_eq!(bs.utile_perdita, out.income.aggregates.net_profit);
    assert!(bs.disponibilita_liquide >= Decimal::ZERO);
    assert_eq!(out.income.statement.ricavi_vendite, dec!(1_620_000));
    // 600k × (0.4 × 1.03 + 0.6 × 1.08)
    assert_eq!(out.income.statement.materie_prime, dec!(636_000));
    // (420k + 80k) × 12%
    assert_eq!(out.income.statement.ammortamenti, dec!(60_000));
    // Not driven: annualized nine-month value
    assert_eq!(
        out.income.statement.get(IncomeStatementCode::Servizi),
        dec!(400_000)
    );
}

#[test]
fn test_full_pipeline_rating() {
    let reference = reference_year();
    let projected = project(
        &reference,
        &reference,
        &GrowthAssumption {
            forecast_year: 2024,
            revenue_growth_pct: Some(dec!(5)),
            ..Default::default()
        },
    )
    .unwrap()
    .result
    .statements();

    let indicators = compute_indicators(&projected.balance, &projected.income);
    let scores = score_indicators(&indicators);
    for indicator in Indicator::ALL {
        let s = scores.get(indicator);
        assert!(s >= Decimal::ZERO && s <= Decimal::ONE, "{indicator:?} = {s}");
    }

    let quiet = classify_crisis(&scores, 0);
    let loud = classify_crisis(&scores, 4);
    assert_eq!(loud, CrisisRating::D);
    assert!(quiet <= loud);
}

#[test]
fn test_distressed_company_lands_in_d_with_alerts() {
    let mut fs = reference_year();
    fs.income.ricavi_vendite = dec!(900_000);
    fs.income.oneri_finanziari = dec!(90_000);
    fs.income.imposte = Decimal::ZERO;
    fs.balance.debiti_breve = dec!(900_000);

    let indicators = compute_indicators(&fs.balance, &fs.income);
    let scores = score_indicators(&indicators);
    assert!(scores.oltre_count() >= 6, "only {} beyond", scores.oltre_count());

    let alerts = ExtraAccountingAlert {
        wage_arrears: true,
        supplier_arrears: true,
        social_security_arrears: true,
        vat_arrears: true,
        ..Default::default()
    };
    let assessment = evaluate_crisis(&scores, &alerts, &ReferenceData::default()).unwrap();
    assert_eq!(assessment.result.rating, CrisisRating::D);
    assert_eq!(assessment.result.description, "Crisi");
    assert_eq!(assessment.result.active_alerts.len(), 4);
}

#[test]
fn test_multi_year_stays_balanced() {
    let reference = reference_year();
    let years: Vec<GrowthAssumption> = (2024..=2027)
        .map(|y| GrowthAssumption {
            forecast_year: y,
            revenue_growth_pct: Some(dec!(6)),
            services_growth_pct: Some(dec!(2)),
            tax_rate_pct: Some(dec!(24)),
            ..Default::default()
        })
        .collect();

    let result = project_multi_year(&reference, &reference, &years).unwrap();
    assert_eq!(result.result.len(), 4);
    for year in &result.result {
        assert!(year.balance.snapshot.is_balanced(), "{} unbalanced", year.forecast_year);
        assert!(year.balance.implied_financing_need >= Decimal::ZERO);
    }
}

#[test]
fn test_invalid_period_is_named_error() {
    let mut partial = nine_months();
    partial.income.period_months = 0;
    let err = project(&reference_year(), &partial, &GrowthAssumption::default()).unwrap_err();
    match err {
        BilancioError::InvalidInput { field, .. } => assert_eq!(field, "period_months"),
        e => panic!("Expected InvalidInput, got {e:?}"),
    }
}
