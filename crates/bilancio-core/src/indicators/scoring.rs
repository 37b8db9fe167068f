use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::compute::{Indicator, IndicatorSet};
use crate::types::Score;

/// Scores strictly below this are "oltre soglia" (beyond threshold).
pub const BEYOND_THRESHOLD: Decimal = dec!(0.33);

/// Normalized scores, index-aligned with [`Indicator::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(pub [Score; 14]);

impl ScoreVector {
    pub fn get(&self, indicator: Indicator) -> Score {
        self.0[indicator.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, Score)> + '_ {
        Indicator::ALL.iter().map(move |i| (*i, self.get(*i)))
    }

    /// Indicators whose score falls below [`BEYOND_THRESHOLD`].
    pub fn beyond_threshold(&self) -> Vec<Indicator> {
        self.iter()
            .filter(|(_, s)| *s < BEYOND_THRESHOLD)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn oltre_count(&self) -> u32 {
        self.beyond_threshold().len() as u32
    }
}

/// `clamp((v - low) / (high - low), 0, 1)`
pub fn linear_score(value: Decimal, low: Decimal, high: Decimal) -> Score {
    if high == low {
        return if value >= high { Decimal::ONE } else { Decimal::ZERO };
    }
    ((value - low) / (high - low)).clamp(Decimal::ZERO, Decimal::ONE)
}

/// `1 - linear_score(v, good_below, bad_above)`
pub fn inverted_score(value: Decimal, good_below: Decimal, bad_above: Decimal) -> Score {
    Decimal::ONE - linear_score(value, good_below, bad_above)
}

/// Net-debt scoring: any net debt against a non-positive EBITDA scores zero.
fn net_debt_score(set: &IndicatorSet) -> Score {
    if set.ebitda <= Decimal::ZERO && set.pfn > Decimal::ZERO {
        Decimal::ZERO
    } else {
        inverted_score(set.pfn_to_ebitda, dec!(0), dec!(6))
    }
}

fn financial_charges_score(set: &IndicatorSet) -> Score {
    if set.ebitda <= Decimal::ZERO {
        if set.financial_charges > Decimal::ZERO {
            Decimal::ZERO
        } else {
            dec!(0.5)
        }
    } else {
        inverted_score(set.financial_charges_to_ebitda, dec!(5), dec!(30))
    }
}

/// Score one indicator. The currency margins are scored through their ratio
/// proxies: tesoreria via the quick ratio, CCN via the current ratio and
/// struttura via equity over fixed assets.
pub fn score_indicator(indicator: Indicator, set: &IndicatorSet) -> Score {
    match indicator {
        Indicator::Dscr => linear_score(set.dscr, dec!(1.0), dec!(1.5)),
        Indicator::EbitdaMargin => linear_score(set.ebitda_margin, dec!(5), dec!(20)),
        Indicator::MargineTesoreria => linear_score(set.quick_ratio, dec!(0.8), dec!(1.3)),
        Indicator::Ccn | Indicator::CurrentRatio => {
            linear_score(set.current_ratio, dec!(0.8), dec!(1.5))
        }
        Indicator::MargineStruttura => {
            linear_score(set.equity_to_fixed_assets, dec!(50), dec!(120))
        }
        Indicator::FixedAssetCoverage => {
            linear_score(set.fixed_asset_coverage, dec!(80), dec!(150))
        }
        Indicator::FinancialIndependence => {
            linear_score(set.financial_independence, dec!(15), dec!(50))
        }
        Indicator::Pfn | Indicator::PfnToEbitda => net_debt_score(set),
        Indicator::Roi => linear_score(set.roi, dec!(0), dec!(12)),
        Indicator::Roe => linear_score(set.roe, dec!(0), dec!(12)),
        Indicator::Ros => linear_score(set.ros, dec!(0), dec!(10)),
        Indicator::FinancialChargesToEbitda => financial_charges_score(set),
    }
}

pub fn score_indicators(set: &IndicatorSet) -> ScoreVector {
    let mut scores = [Decimal::ZERO; 14];
    for indicator in Indicator::ALL {
        scores[indicator.index()] = score_indicator(indicator, set);
    }
    ScoreVector(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_dscr(dscr: Decimal) -> IndicatorSet {
        IndicatorSet {
            dscr,
            ..Default::default()
        }
    }

    #[test]
    fn test_dscr_band_edges_and_midpoint() {
        assert_eq!(score_indicator(Indicator::Dscr, &with_dscr(dec!(1.0))), dec!(0));
        assert_eq!(score_indicator(Indicator::Dscr, &with_dscr(dec!(1.5))), dec!(1));
        assert_eq!(score_indicator(Indicator::Dscr, &with_dscr(dec!(1.25))), dec!(0.5));
    }

    #[test]
    fn test_linear_score_clamps() {
        assert_eq!(linear_score(dec!(-10), dec!(0), dec!(12)), Decimal::ZERO);
        assert_eq!(linear_score(dec!(40), dec!(0), dec!(12)), Decimal::ONE);
        assert_eq!(linear_score(dec!(6), dec!(0), dec!(12)), dec!(0.5));
    }

    #[test]
    fn test_degenerate_band() {
        assert_eq!(linear_score(dec!(1), dec!(1), dec!(1)), Decimal::ONE);
        assert_eq!(linear_score(dec!(0.9), dec!(1), dec!(1)), Decimal::ZERO);
    }

    #[test]
    fn test_inverted_score() {
        assert_eq!(inverted_score(dec!(0), dec!(0), dec!(6)), Decimal::ONE);
        assert_eq!(inverted_score(dec!(3), dec!(0), dec!(6)), dec!(0.5));
        assert_eq!(inverted_score(dec!(9), dec!(0), dec!(6)), Decimal::ZERO);
    }

    #[test]
    fn test_pfn_with_zero_ebitda_scores_zero() {
        let set = IndicatorSet {
            ebitda: Decimal::ZERO,
            pfn: dec!(50_000),
            pfn_to_ebitda: Decimal::ZERO,
            ..Default::default()
        };
        assert_eq!(score_indicator(Indicator::Pfn, &set), Decimal::ZERO);
        assert_eq!(score_indicator(Indicator::PfnToEbitda, &set), Decimal::ZERO);
    }

    #[test]
    fn test_net_cash_with_zero_ebitda_scores_full() {
        let set = IndicatorSet {
            pfn: dec!(-20_000),
            ..Default::default()
        };
        assert_eq!(score_indicator(Indicator::Pfn, &set), Decimal::ONE);
    }

    #[test]
    fn test_financial_charges_without_ebitda() {
        let mut set = IndicatorSet {
            ebitda: dec!(-1),
            financial_charges: dec!(100),
            ..Default::default()
        };
        assert_eq!(
            score_indicator(Indicator::FinancialChargesToEbitda, &set),
            Decimal::ZERO
        );
        set.financial_charges = Decimal::ZERO;
        assert_eq!(
            score_indicator(Indicator::FinancialChargesToEbitda, &set),
            dec!(0.5)
        );
    }

    #[test]
    fn test_financial_charges_band() {
        let set = IndicatorSet {
            ebitda: dec!(100),
            financial_charges: dec!(17.5),
            financial_charges_to_ebitda: dec!(17.5),
            ..Default::default()
        };
        assert_eq!(
            score_indicator(Indicator::FinancialChargesToEbitda, &set),
            dec!(0.5)
        );
    }

    #[test]
    fn test_proxies_share_ratio_scores() {
        let set = IndicatorSet {
            current_ratio: dec!(1.15),
            quick_ratio: dec!(1.05),
            equity_to_fixed_assets: dec!(85),
            ..Default::default()
        };
        let scores = score_indicators(&set);
        assert_eq!(scores.get(Indicator::Ccn), scores.get(Indicator::CurrentRatio));
        assert_eq!(scores.get(Indicator::Ccn), dec!(0.5));
        assert_eq!(scores.get(Indicator::MargineTesoreria), dec!(0.5));
        assert_eq!(scores.get(Indicator::MargineStruttura), dec!(0.5));
    }

    #[test]
    fn test_all_scores_in_unit_interval() {
        let extremes = [dec!(-1_000_000), dec!(-1), dec!(0), dec!(0.5), dec!(3), dec!(1_000_000)];
        for v in extremes {
            for e in extremes {
                let set = IndicatorSet {
                    dscr: v,
                    ebitda_margin: v,
                    current_ratio: v,
                    fixed_asset_coverage: v,
                    financial_independence: v,
                    pfn: v,
                    pfn_to_ebitda: v,
                    roi: v,
                    roe: v,
                    ros: v,
                    financial_charges_to_ebitda: v,
                    ebitda: e,
                    quick_ratio: v,
                    equity_to_fixed_assets: v,
                    financial_charges: e,
                    ..Default::default()
                };
                for (indicator, score) in score_indicators(&set).iter() {
                    assert!(
                        score >= Decimal::ZERO && score <= Decimal::ONE,
                        "{indicator:?} scored {score} out of range"
                    );
                }
            }
        }
    }

    #[test]
    fn test_beyond_threshold_counting() {
        let mut scores = [Decimal::ONE; 14];
        scores[Indicator::Roe.index()] = dec!(0.32);
        scores[Indicator::Ros.index()] = dec!(0.33);
        scores[Indicator::Dscr.index()] = Decimal::ZERO;
        let v = ScoreVector(scores);
        assert_eq!(v.beyond_threshold(), vec![Indicator::Dscr, Indicator::Roe]);
        assert_eq!(v.oltre_count(), 2);
    }
}
