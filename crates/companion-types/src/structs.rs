//! Core document structs for the companion world state.
//!
//! [`StateDocument`] is the single shared record of where the companion
//! is, what she is wearing, her call status, and the bonding metrics.
//! [`WorldDocument`] is read-only reference data about locations.
//!
//! Every struct carries a flattened `extra` map. The documents are shared
//! with other services, and fields this crate does not model must survive
//! a load/save cycle untouched.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::enums::ActivityStatus;
use crate::ids::{LocationId, MemoryId};
use crate::intensity::Intensity;

/// Location assumed when the document does not name one.
pub const DEFAULT_LOCATION: &str = "bedroom";

/// Bonding score of a freshly created document.
pub const DEFAULT_BONDING_SCORE: f64 = 0.5;

/// Value of [`InteractionRecord::kind`] for touch events.
pub const INTERACTION_KIND_TOUCH: &str = "touch";

/// Meaning of a touch nobody classified.
pub const DEFAULT_EMOTIONAL_MEANING: &str = "physical_touch";

/// Outfit style when none was given.
pub const DEFAULT_OUTFIT_STYLE: &str = "casual";

/// Outfit change reason when none was given.
pub const DEFAULT_CHANGE_REASON: &str = "unknown";

const fn default_bonding_score() -> f64 {
    DEFAULT_BONDING_SCORE
}

fn default_outfit_style() -> String {
    DEFAULT_OUTFIT_STYLE.to_owned()
}

fn default_change_reason() -> String {
    DEFAULT_CHANGE_REASON.to_owned()
}

fn default_interaction_kind() -> String {
    INTERACTION_KIND_TOUCH.to_owned()
}

fn default_emotional_meaning() -> String {
    DEFAULT_EMOTIONAL_MEANING.to_owned()
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_bonding<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_BONDING_SCORE))
}

// ---------------------------------------------------------------------------
// State document
// ---------------------------------------------------------------------------

/// The companion's mutable world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Where the companion currently is.
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: LocationId,
    /// Coarse activity state. Kept consistent with [`Self::in_call`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ActivityStatus,
    /// The last outfit reported by the client. `None` until the first sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_outfit: Option<Outfit>,
    /// Most recent touch interactions, oldest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub interaction_history: VecDeque<InteractionRecord>,
    /// Accumulated relational closeness in `[0.0, 1.0]`.
    #[serde(
        default = "default_bonding_score",
        deserialize_with = "null_as_default_bonding"
    )]
    pub bonding_score: f64,
    /// Whether a call is in progress.
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_call: bool,
    /// Kind of the active call (`voice`, `video`).
    #[serde(default)]
    pub call_type: Option<String>,
    /// Unix timestamp (seconds) at which the active call started.
    #[serde(default)]
    pub call_start: Option<f64>,
    /// Duration in seconds of the most recently ended call.
    #[serde(default)]
    pub last_call_duration: Option<f64>,
    /// Fields owned by other writers of the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            location: LocationId::default(),
            status: ActivityStatus::default(),
            current_outfit: None,
            interaction_history: VecDeque::new(),
            bonding_score: DEFAULT_BONDING_SCORE,
            in_call: false,
            call_type: None,
            call_start: None,
            last_call_duration: None,
            extra: Map::new(),
        }
    }
}

/// The outfit the companion is wearing.
///
/// Always replaced as a whole; fields are never merged across syncs.
/// Records written by older clients may lack fields; those load with the
/// same defaults a sync would use (`changed_at` falls back to `0.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    /// Free-text description of the outfit.
    #[serde(default)]
    pub description: String,
    /// Style bucket (`casual`, `formal`, ...).
    #[serde(default = "default_outfit_style")]
    pub style: String,
    /// Unix timestamp (seconds) of the change.
    #[serde(default)]
    pub changed_at: f64,
    /// Why the outfit changed.
    #[serde(default = "default_change_reason")]
    pub reason: String,
    /// Fields written by other clients.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recorded physical interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Interaction category, always [`INTERACTION_KIND_TOUCH`] for records
    /// written by this engine.
    #[serde(rename = "type", default = "default_interaction_kind")]
    pub kind: String,
    /// Body part touched (`Nose`, `Cheeks`, ...).
    #[serde(default)]
    pub part: Option<String>,
    /// Gesture used (`Tap`, `Slide`, ...).
    #[serde(default)]
    pub gesture: Option<String>,
    /// Intensity exactly as the client reported it.
    #[serde(default)]
    pub intensity: Option<Intensity>,
    /// Classification key used to score the interaction.
    #[serde(default = "default_emotional_meaning")]
    pub emotional_meaning: String,
    /// Unix timestamp (seconds). `0.0` for records that never had one.
    #[serde(default)]
    pub timestamp: f64,
    /// Fields written by other clients.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// World document
// ---------------------------------------------------------------------------

/// Reference data describing the locations of the world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDocument {
    /// Location metadata keyed by slug.
    #[serde(default)]
    pub locations: BTreeMap<LocationId, LocationInfo>,
    /// Sections of the world document this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorldDocument {
    /// Look up a location's metadata.
    pub fn location(&self, id: &LocationId) -> Option<&LocationInfo> {
        self.locations.get(id)
    }
}

/// Metadata about one location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Whether the location is exposed to the weather.
    #[serde(default)]
    pub is_outdoor: bool,
    /// Display names, descriptions and other presentation data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Simulated wind at the companion's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindState {
    /// Wind speed, `0.0` when indoors.
    pub speed: f64,
    /// Unit-ish direction vector `[x, y]`.
    pub direction: [f64; 2],
    /// How irregular the wind is, `0.0` when indoors.
    pub gustiness: f64,
    /// Whether the location is outdoors.
    pub is_outdoor: bool,
    /// The location the wind was derived for (outdoor results only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationId>,
}

/// A durable memory handed to the external memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique, time-ordered identifier.
    pub id: MemoryId,
    /// Human-readable memory text.
    pub text: String,
    /// Context chain the memory belongs to (e.g. `call_history`).
    pub context_chain_id: String,
    /// When the memory was created.
    pub created_at: DateTime<Utc>,
}

impl MemoryRecord {
    /// Create a memory stamped with the current time.
    pub fn new(text: impl Into<String>, context_chain_id: impl Into<String>) -> Self {
        Self {
            id: MemoryId::new(),
            text: text.into(),
            context_chain_id: context_chain_id.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn empty_state_document_gets_defaults() {
        let doc: StateDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.location.as_str(), DEFAULT_LOCATION);
        assert_eq!(doc.status, ActivityStatus::Chilling);
        assert!(doc.interaction_history.is_empty());
        assert!((doc.bonding_score - DEFAULT_BONDING_SCORE).abs() < f64::EPSILON);
        assert!(!doc.in_call);
        assert!(doc.current_outfit.is_none());
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let raw = r#"{"location":"kitchen","mood":"happy","energy":7}"#;
        let doc: StateDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.extra.get("mood"), Some(&Value::from("happy")));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["mood"], "happy");
        assert_eq!(json["energy"], 7);
        assert_eq!(json["location"], "kitchen");
    }

    #[test]
    fn interaction_record_uses_type_key() {
        let record = InteractionRecord {
            kind: INTERACTION_KIND_TOUCH.to_owned(),
            part: Some(String::from("Nose")),
            gesture: Some(String::from("Tap")),
            intensity: Some(Intensity::from(2)),
            emotional_meaning: String::from("cute_boop"),
            timestamp: 1_700_000_000.0,
            extra: Map::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "touch");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn partial_nested_records_load_with_defaults() {
        let raw = r#"{
            "location": null,
            "status": null,
            "bonding_score": null,
            "current_outfit": {"style": "formal"},
            "interaction_history": [
                {"type": "touch", "part": "Nose", "gesture": "Tap", "intensity": 2},
                {"emotional_meaning": "cute_boop", "intensity": "high", "source": "watch"}
            ]
        }"#;
        let doc: StateDocument = serde_json::from_str(raw).unwrap();

        assert_eq!(doc.location.as_str(), DEFAULT_LOCATION);
        assert_eq!(doc.status, ActivityStatus::Chilling);
        assert!((doc.bonding_score - DEFAULT_BONDING_SCORE).abs() < f64::EPSILON);

        let outfit = doc.current_outfit.unwrap();
        assert_eq!(outfit.description, "");
        assert_eq!(outfit.style, "formal");
        assert_eq!(outfit.reason, DEFAULT_CHANGE_REASON);
        assert!(outfit.changed_at.abs() < f64::EPSILON);

        let first = doc.interaction_history.front().unwrap();
        assert_eq!(first.emotional_meaning, DEFAULT_EMOTIONAL_MEANING);
        assert!(first.timestamp.abs() < f64::EPSILON);

        let second = doc.interaction_history.back().unwrap();
        assert_eq!(second.kind, INTERACTION_KIND_TOUCH);
        assert_eq!(second.intensity, Some(Intensity(Value::from("high"))));
        assert_eq!(second.extra.get("source"), Some(&Value::from("watch")));
    }

    #[test]
    fn indoor_wind_omits_location() {
        let wind = WindState {
            speed: 0.0,
            direction: [1.0, 0.0],
            gustiness: 0.0,
            is_outdoor: false,
            location: None,
        };
        let json = serde_json::to_value(&wind).unwrap();
        assert!(json.get("location").is_none());
    }

    #[test]
    fn world_location_flag_defaults_to_indoor() {
        let raw = r#"{"locations":{"bedroom":{"name":"Bedroom"},"garden":{"is_outdoor":true}}}"#;
        let world: WorldDocument = serde_json::from_str(raw).unwrap();
        assert!(!world.location(&LocationId::from("bedroom")).unwrap().is_outdoor);
        assert!(world.location(&LocationId::from("garden")).unwrap().is_outdoor);
    }
}
