//! Event reports sent by the client device.
//!
//! Every field is optional. Absence is never an error: each mutator in
//! `companion-state` applies a documented default. Unknown keys sent by
//! newer clients (`model_id`, `is_talking`) are ignored.

use serde::{Deserialize, Serialize};

use crate::enums::CallEvent;
use crate::intensity::Intensity;

/// Body of `POST /state/outfit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutfitReport {
    /// Free-text outfit description. Default `""`.
    #[serde(default)]
    pub outfit_description: Option<String>,
    /// Style bucket. Default `"casual"`.
    #[serde(default)]
    pub style: Option<String>,
    /// Unix timestamp (seconds) of the change. Default now.
    #[serde(default)]
    pub timestamp: Option<f64>,
    /// Why the outfit changed. Default `"unknown"`.
    #[serde(default)]
    pub change_reason: Option<String>,
}

/// Body of `POST /state/interaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// Body part touched.
    #[serde(default)]
    pub part: Option<String>,
    /// Gesture used.
    #[serde(default)]
    pub gesture: Option<String>,
    /// 1 gentle, 2 moderate, 3 intense. Any other value is kept but
    /// scores like no intensity.
    #[serde(default)]
    pub intensity: Option<Intensity>,
    /// Classification key. Derived from part and gesture when absent.
    #[serde(default)]
    pub emotional_meaning: Option<String>,
    /// Unix timestamp (seconds). Default now.
    #[serde(default)]
    pub timestamp: Option<f64>,
}

/// Body of `POST /state/call`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallReport {
    /// Lifecycle event. Missing or unrecognized events change nothing.
    #[serde(default)]
    pub event: Option<CallEvent>,
    /// Call kind. Default `"voice"`.
    #[serde(default, rename = "type")]
    pub call_type: Option<String>,
    /// Unix timestamp (seconds) of a call start. Default now.
    #[serde(default)]
    pub timestamp: Option<f64>,
    /// Length in seconds of an ended call. Default `0`.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn empty_bodies_parse() {
        let outfit: OutfitReport = serde_json::from_str("{}").unwrap();
        assert_eq!(outfit, OutfitReport::default());
        let call: CallReport = serde_json::from_str("{}").unwrap();
        assert!(call.event.is_none());
    }

    #[test]
    fn client_extras_are_ignored() {
        let raw = r#"{"part":"Nose","gesture":"Tap","intensity":3,"is_talking":false}"#;
        let report: InteractionReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.intensity, Some(Intensity::from(3)));
        assert!(report.emotional_meaning.is_none());
    }

    #[test]
    fn odd_intensities_are_accepted() {
        for raw in [
            r#"{"intensity":3.0}"#,
            r#"{"intensity":2.5}"#,
            r#"{"intensity":"high"}"#,
            r#"{"intensity":null}"#,
        ] {
            let report: Result<InteractionReport, _> = serde_json::from_str(raw);
            assert!(report.is_ok(), "rejected {raw}");
        }
    }

    #[test]
    fn call_type_reads_from_type_key() {
        let raw = r#"{"event":"call_ended","type":"video","duration":125}"#;
        let report: CallReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.event, Some(CallEvent::Ended));
        assert_eq!(report.call_type.as_deref(), Some("video"));
        assert!(report.duration.is_some_and(|d| (d - 125.0).abs() < f64::EPSILON));
    }
}
