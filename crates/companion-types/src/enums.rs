//! Enumeration types for the companion world state.
//!
//! Both enums round-trip through plain strings. Other services write to
//! the same state document, so values this crate does not know about are
//! carried verbatim instead of being rejected.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Activity status
// ---------------------------------------------------------------------------

/// Coarse activity of the companion.
///
/// `Chilling` and `OnCall` are the two states this engine moves between.
/// Any other value (`"sleeping"`, `"working"`, ...) set by another writer
/// is preserved as [`ActivityStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityStatus {
    /// Idle and available.
    #[default]
    Chilling,
    /// Currently on a voice or video call.
    OnCall,
    /// A status owned by another writer of the document.
    Other(String),
}

impl ActivityStatus {
    /// The wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chilling => "chilling",
            Self::OnCall => "on_call",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for ActivityStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "chilling" => Self::Chilling,
            "on_call" => Self::OnCall,
            _ => Self::Other(value),
        }
    }
}

impl From<ActivityStatus> for String {
    fn from(status: ActivityStatus) -> Self {
        match status {
            ActivityStatus::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl core::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Call lifecycle events
// ---------------------------------------------------------------------------

/// A call lifecycle event reported by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallEvent {
    /// The user started a call.
    Started,
    /// The user hung up.
    Ended,
    /// Any event name the tracker does not act on.
    Unrecognized(String),
}

impl From<String> for CallEvent {
    fn from(value: String) -> Self {
        match value.as_str() {
            "call_started" => Self::Started,
            "call_ended" => Self::Ended,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<CallEvent> for String {
    fn from(event: CallEvent) -> Self {
        match event {
            CallEvent::Started => Self::from("call_started"),
            CallEvent::Ended => Self::from("call_ended"),
            CallEvent::Unrecognized(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        let status: ActivityStatus = serde_json::from_str("\"on_call\"").unwrap_or_default();
        assert_eq!(status, ActivityStatus::OnCall);
    }

    #[test]
    fn foreign_status_is_preserved() {
        let status: Result<ActivityStatus, _> = serde_json::from_str("\"sleeping\"");
        let status = status.ok();
        assert_eq!(status, Some(ActivityStatus::Other(String::from("sleeping"))));
        let json = status.and_then(|s| serde_json::to_string(&s).ok());
        assert_eq!(json.as_deref(), Some("\"sleeping\""));
    }

    #[test]
    fn call_events_parse() {
        let started: Result<CallEvent, _> = serde_json::from_str("\"call_started\"");
        assert_eq!(started.ok(), Some(CallEvent::Started));
        let other: Result<CallEvent, _> = serde_json::from_str("\"call_paused\"");
        assert_eq!(
            other.ok(),
            Some(CallEvent::Unrecognized(String::from("call_paused")))
        );
    }
}
