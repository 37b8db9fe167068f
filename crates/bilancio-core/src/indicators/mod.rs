pub mod compute;
pub mod scoring;

pub use compute::{compute_indicators, net_financial_position, Indicator, IndicatorSet, IndicatorUnit};
pub use scoring::{
    inverted_score, linear_score, score_indicator, score_indicators, ScoreVector, BEYOND_THRESHOLD,
};
