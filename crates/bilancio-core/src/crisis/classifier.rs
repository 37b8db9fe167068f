use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::alerts::ExtraAccountingAlert;
use crate::indicators::{Indicator, ScoreVector};
use crate::reference::{AlertDefinition, ReferenceData};
use crate::types::{with_metadata, ComputationOutput};
use crate::BilancioResult;

// ---------------------------------------------------------------------------
// Rating bands
// ---------------------------------------------------------------------------

/// Crisis bands from best (A3) to worst (D). `Ord` follows that order, so a
/// smaller rating is a better one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrisisRating {
    A3,
    A2,
    A1,
    B3,
    B2,
    B1,
    C3,
    C2,
    C1,
    D,
}

impl CrisisRating {
    pub const ALL: [CrisisRating; 10] = [
        Self::A3,
        Self::A2,
        Self::A1,
        Self::B3,
        Self::B2,
        Self::B1,
        Self::C3,
        Self::C2,
        Self::C1,
        Self::D,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::A3 => "A3",
            Self::A2 => "A2",
            Self::A1 => "A1",
            Self::B3 => "B3",
            Self::B2 => "B2",
            Self::B1 => "B1",
            Self::C3 => "C3",
            Self::C2 => "C2",
            Self::C1 => "C1",
            Self::D => "D",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::A3 => "Nessun rischio",
            Self::A2 => "Rischio minimo",
            Self::A1 => "Rischio basso",
            Self::B3 => "Rischio moderato",
            Self::B2 => "Rischio significativo",
            Self::B1 => "Rischio elevato",
            Self::C3 => "Rischio alto",
            Self::C2 => "Rischio grave",
            Self::C1 => "Pre-crisi",
            Self::D => "Crisi",
        }
    }

    pub fn is_better_than(&self, other: &CrisisRating) -> bool {
        self < other
    }
}

impl std::fmt::Display for CrisisRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// First-match decision table over the number of indicators beyond
/// threshold and the number of raised alerts.
pub fn classify_counts(oltre_count: u32, alert_count: u32) -> CrisisRating {
    let (o, a) = (oltre_count, alert_count);
    if o == 0 && a == 0 {
        CrisisRating::A3
    } else if o <= 2 && a == 0 {
        CrisisRating::A2
    } else if o == 3 && a == 0 {
        CrisisRating::A1
    } else if o <= 5 && a == 0 {
        CrisisRating::B3
    } else if a <= 1 && o <= 5 {
        CrisisRating::B2
    } else if a <= 2 && o <= 5 {
        CrisisRating::B1
    } else if a <= 3 && o <= 6 {
        CrisisRating::C3
    } else if a <= 3 && o <= 7 {
        CrisisRating::C2
    } else if a <= 3 && o > 7 {
        // Closes the C3/C2/C1 ladder for up to three alerts; four or more is D.
        CrisisRating::C1
    } else {
        CrisisRating::D
    }
}

pub fn classify_crisis(scores: &ScoreVector, alert_count: u32) -> CrisisRating {
    let oltre_count = scores.oltre_count();
    let rating = classify_counts(oltre_count, alert_count);
    tracing::debug!(oltre_count, alert_count, rating = %rating, "classified crisis band");
    rating
}

// ---------------------------------------------------------------------------
// Full assessment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisAssessment {
    pub rating: CrisisRating,
    pub description: String,
    pub oltre_count: u32,
    pub alert_count: u32,
    pub beyond_threshold: Vec<Indicator>,
    pub active_alerts: Vec<AlertDefinition>,
}

#[derive(Serialize)]
struct CrisisAssumptions<'a> {
    scores: &'a ScoreVector,
    alerts: &'a ExtraAccountingAlert,
}

/// Classify and explain: which indicators are beyond threshold and which
/// statutory alerts were raised.
pub fn evaluate_crisis(
    scores: &ScoreVector,
    alerts: &ExtraAccountingAlert,
    reference: &ReferenceData,
) -> BilancioResult<ComputationOutput<CrisisAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let alert_count = alerts.active_count();
    let rating = classify_crisis(scores, alert_count);
    let beyond_threshold = scores.beyond_threshold();

    let mut active_alerts = Vec::new();
    for key in alerts.active_keys() {
        match reference.alert(key) {
            Some(def) => active_alerts.push(def.clone()),
            None => warnings.push(format!("No reference definition for alert '{key}'")),
        }
    }

    if rating >= CrisisRating::C1 {
        warnings.push(format!(
            "Rating {rating} ({}): statutory early-warning procedures may apply",
            rating.description()
        ));
    }

    let output = CrisisAssessment {
        rating,
        description: rating.description().to_string(),
        oltre_count: beyond_threshold.len() as u32,
        alert_count,
        beyond_threshold,
        active_alerts,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Crisis band decision table (indicators beyond threshold x extra-accounting alerts)",
        &CrisisAssumptions { scores, alerts },
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
