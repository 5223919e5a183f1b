//! Outfit synchronization.
//!
//! The client owns the wardrobe; the server only mirrors the latest
//! choice. Each sync replaces `current_outfit` wholesale, so a report
//! carrying only a style still resets the description to empty.

use companion_types::{Outfit, OutfitReport, StateDocument};
use serde_json::Map;
use tracing::info;

/// Style used when the report does not name one.
pub const DEFAULT_STYLE: &str = companion_types::DEFAULT_OUTFIT_STYLE;

/// Reason used when the report does not give one.
pub const DEFAULT_CHANGE_REASON: &str = companion_types::DEFAULT_CHANGE_REASON;

/// Number of description characters echoed into the log.
const LOG_DESCRIPTION_CHARS: usize = 50;

/// Build the outfit described by `report`, filling defaults.
pub fn outfit_from_report(report: &OutfitReport, now: f64) -> Outfit {
    Outfit {
        description: report.outfit_description.clone().unwrap_or_default(),
        style: report
            .style
            .clone()
            .unwrap_or_else(|| DEFAULT_STYLE.to_owned()),
        changed_at: report.timestamp.unwrap_or(now),
        reason: report
            .change_reason
            .clone()
            .unwrap_or_else(|| DEFAULT_CHANGE_REASON.to_owned()),
        extra: Map::new(),
    }
}

/// Replace the document's outfit with the one in `report`.
pub fn apply_outfit(document: &mut StateDocument, report: &OutfitReport, now: f64) {
    let outfit = outfit_from_report(report, now);

    info!(
        description = %truncate_chars(&outfit.description, LOG_DESCRIPTION_CHARS),
        style = %outfit.style,
        reason = %outfit.reason,
        "Outfit updated"
    );

    document.current_outfit = Some(outfit);
}

/// The first `max` characters of `text`, cut on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices()
        .nth(max)
        .map_or(text, |(idx, _)| text.get(..idx).unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn full_report_is_copied() {
        let mut doc = StateDocument::default();
        let report = OutfitReport {
            outfit_description: Some(String::from("red sundress with sandals")),
            style: Some(String::from("summer")),
            timestamp: Some(42.5),
            change_reason: Some(String::from("went to the beach")),
        };
        apply_outfit(&mut doc, &report, NOW);

        let outfit = doc.current_outfit.unwrap_or_else(|| panic!("outfit missing"));
        assert_eq!(outfit.description, "red sundress with sandals");
        assert_eq!(outfit.style, "summer");
        assert!((outfit.changed_at - 42.5).abs() < f64::EPSILON);
        assert_eq!(outfit.reason, "went to the beach");
    }

    #[test]
    fn empty_report_uses_defaults() {
        let outfit = outfit_from_report(&OutfitReport::default(), NOW);
        assert_eq!(outfit.description, "");
        assert_eq!(outfit.style, "casual");
        assert!((outfit.changed_at - NOW).abs() < f64::EPSILON);
        assert_eq!(outfit.reason, "unknown");
    }

    #[test]
    fn style_only_sync_resets_description() {
        let mut doc = StateDocument::default();
        apply_outfit(
            &mut doc,
            &OutfitReport {
                outfit_description: Some(String::from("cozy hoodie")),
                change_reason: Some(String::from("cold")),
                ..OutfitReport::default()
            },
            NOW,
        );
        apply_outfit(
            &mut doc,
            &OutfitReport {
                style: Some(String::from("formal")),
                ..OutfitReport::default()
            },
            NOW,
        );

        let outfit = doc.current_outfit.unwrap_or_else(|| panic!("outfit missing"));
        assert_eq!(outfit.description, "");
        assert_eq!(outfit.style, "formal");
        assert_eq!(outfit.reason, "unknown");
    }

    #[test]
    fn log_truncation_respects_char_boundaries() {
        let long = "é".repeat(80);
        assert_eq!(truncate_chars(&long, 50).chars().count(), 50);
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
