//! Physical interaction recording and the bonding-score model.
//!
//! Each touch event is appended to a sliding window of the 50 most
//! recent interactions and raises the bonding score:
//!
//! ```text
//! bonding' = min(1.0, bonding + base_bonus(meaning) * multiplier(intensity))
//! ```
//!
//! | Meaning | Base bonus |
//! |---------|-----------:|
//! | `intimate_finger_kiss` | 0.05 |
//! | `sensual_shy_touch` | 0.04 |
//! | `affectionate_nuzzle`, `mischievous_ear_stroke` | 0.03 |
//! | `ticklish_play`, `cute_boop`, `playful_hair_tugging`, `gentle_pat` | 0.02 |
//! | `attention_seeking`, `playful_tease_ouch`, `physical_touch` | 0.01 |
//! | `playful_annoyance` | 0.00 |
//! | anything else | 0.01 |
//!
//! Intensity 3 multiplies the bonus by 1.2, intensity 1 by 0.8, and any
//! other value (including none, `2.5` or a string) leaves it unchanged.
//! Whole floats count as their integer (`3.0` is intense). Bonuses are never
//! negative, so the score only ever rises and saturates at 1.0.

use std::collections::VecDeque;

use companion_types::{
    DEFAULT_BONDING_SCORE, INTERACTION_KIND_TOUCH, Intensity, InteractionRecord,
    InteractionReport, StateDocument,
};
use serde_json::Map;
use tracing::info;

use crate::touch::{self, EmotionalMeaning};

/// Hard cap on the length of the interaction history.
pub const MAX_INTERACTION_HISTORY: usize = 50;

/// Base bonus for meanings missing from the bonding table.
pub const FALLBACK_BONUS: f64 = 0.01;

/// Upper bound of the bonding score.
pub const MAX_BONDING_SCORE: f64 = 1.0;

/// Base bonus for a known meaning.
pub const fn bonding_bonus(meaning: EmotionalMeaning) -> f64 {
    match meaning {
        EmotionalMeaning::IntimateFingerKiss => 0.05,
        EmotionalMeaning::SensualShyTouch => 0.04,
        EmotionalMeaning::AffectionateNuzzle | EmotionalMeaning::MischievousEarStroke => 0.03,
        EmotionalMeaning::TicklishPlay
        | EmotionalMeaning::CuteBoop
        | EmotionalMeaning::PlayfulHairTugging
        | EmotionalMeaning::GentlePat => 0.02,
        EmotionalMeaning::AttentionSeeking
        | EmotionalMeaning::PlayfulTeaseOuch
        | EmotionalMeaning::PhysicalTouch => 0.01,
        EmotionalMeaning::PlayfulAnnoyance => 0.0,
    }
}

/// Base bonus for a wire key, falling back to [`FALLBACK_BONUS`] for keys
/// outside the table.
pub fn base_bonus(meaning_key: &str) -> f64 {
    EmotionalMeaning::from_key(meaning_key).map_or(FALLBACK_BONUS, bonding_bonus)
}

/// Scale applied to the base bonus for a given intensity.
pub fn intensity_multiplier(intensity: Option<&Intensity>) -> f64 {
    match intensity.and_then(Intensity::level) {
        Some(Intensity::INTENSE) => 1.2,
        Some(Intensity::GENTLE) => 0.8,
        _ => 1.0,
    }
}

/// Force a score into `[0.0, 1.0]`. Non-finite values reset to the default.
pub fn clamp_bonding(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_BONDING_SCORE)
    } else {
        DEFAULT_BONDING_SCORE
    }
}

/// Drop the oldest records until at most [`MAX_INTERACTION_HISTORY`] remain.
pub fn truncate_history(history: &mut VecDeque<InteractionRecord>) {
    while history.len() > MAX_INTERACTION_HISTORY {
        history.pop_front();
    }
}

/// Result of recording one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionOutcome {
    /// Bonding score after the update.
    pub bonding_score: f64,
    /// Amount actually added (after the multiplier, before saturation).
    pub bonus: f64,
    /// Meaning key the interaction was scored under.
    pub emotional_meaning: String,
}

/// Apply an interaction report to the document.
///
/// The meaning is the reported `emotional_meaning` when present,
/// otherwise the classification of `(part, gesture)`, which itself falls
/// back to `physical_touch`. `now` stamps reports without a timestamp.
pub fn record_interaction(
    document: &mut StateDocument,
    report: &InteractionReport,
    now: f64,
) -> InteractionOutcome {
    let meaning = report.emotional_meaning.clone().unwrap_or_else(|| {
        touch::classify(report.part.as_deref(), report.gesture.as_deref())
            .key()
            .to_owned()
    });

    document.interaction_history.push_back(InteractionRecord {
        kind: INTERACTION_KIND_TOUCH.to_owned(),
        part: report.part.clone(),
        gesture: report.gesture.clone(),
        intensity: report.intensity.clone(),
        emotional_meaning: meaning.clone(),
        timestamp: report.timestamp.unwrap_or(now),
        extra: Map::new(),
    });
    truncate_history(&mut document.interaction_history);

    let bonus = base_bonus(&meaning) * intensity_multiplier(report.intensity.as_ref());
    document.bonding_score =
        clamp_bonding((document.bonding_score + bonus).min(MAX_BONDING_SCORE));

    info!(
        meaning = %meaning,
        part = report.part.as_deref().unwrap_or("unknown"),
        intensity = touch::intensity_label(report.intensity.as_ref()),
        bonding = %format!("{:.3}", document.bonding_score),
        "Interaction recorded"
    );

    InteractionOutcome {
        bonding_score: document.bonding_score,
        bonus,
        emotional_meaning: meaning,
    }
}
