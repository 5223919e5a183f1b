//! Call lifecycle tracking.
//!
//! A two-state machine over `idle` (status `chilling`) and `on_call`:
//!
//! ```text
//!            call_started
//!   idle ------------------> on_call
//!    ^                          |
//!    +-------- call_ended ------+
//! ```
//!
//! Transitions are not guarded. `call_ended` while already idle is
//! accepted and still produces a memory record, and a second
//! `call_started` simply restarts the call. Events the tracker does not
//! know leave the document unchanged.

use companion_types::{ActivityStatus, CallEvent, CallReport, MemoryRecord, StateDocument};
use tracing::info;

/// Call kind used when the report does not name one.
pub const DEFAULT_CALL_TYPE: &str = "voice";

/// Context chain under which call memories are filed.
pub const CALL_HISTORY_CONTEXT: &str = "call_history";

/// What a call report did to the document.
#[derive(Debug, Clone, PartialEq)]
pub enum CallTransition {
    /// A call began.
    Started {
        /// Kind of call.
        call_type: String,
    },
    /// A call finished. The memory must be handed to the memory store once
    /// the document is saved.
    Ended {
        /// Reported length in seconds.
        duration: f64,
        /// Memory describing the call.
        memory: MemoryRecord,
    },
    /// The event was missing or unrecognized; nothing changed.
    Ignored,
}

/// Apply a call report to the document.
pub fn apply_call_event(
    document: &mut StateDocument,
    report: &CallReport,
    now: f64,
) -> CallTransition {
    let call_type = report
        .call_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CALL_TYPE.to_owned());

    match &report.event {
        Some(CallEvent::Started) => {
            document.in_call = true;
            document.call_type = Some(call_type.clone());
            document.call_start = Some(report.timestamp.unwrap_or(now));
            document.status = ActivityStatus::OnCall;

            info!(call_type = %call_type, "Call started");
            CallTransition::Started { call_type }
        }
        Some(CallEvent::Ended) => {
            let duration = report.duration.unwrap_or(0.0);
            document.in_call = false;
            document.call_type = None;
            document.last_call_duration = Some(duration);
            document.status = ActivityStatus::Chilling;

            let memory =
                MemoryRecord::new(call_memory_text(&call_type, duration), CALL_HISTORY_CONTEXT);

            info!(
                call_type = %call_type,
                seconds = %format!("{:.0}", duration.trunc()),
                "Call ended"
            );
            CallTransition::Ended { duration, memory }
        }
        Some(CallEvent::Unrecognized(event)) => {
            tracing::debug!(event = %event, "Ignoring unrecognized call event");
            CallTransition::Ignored
        }
        None => {
            tracing::debug!("Call report without event, nothing to apply");
            CallTransition::Ignored
        }
    }
}

/// Memory text for a finished call, with the duration in whole minutes.
pub fn call_memory_text(call_type: &str, duration_secs: f64) -> String {
    let minutes = (duration_secs.max(0.0) / 60.0).trunc();
    format!("Had a {call_type} call with boyfriend for {minutes:.0} minutes")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    fn call(event: CallEvent, call_type: Option<&str>, duration: Option<f64>) -> CallReport {
        CallReport {
            event: Some(event),
            call_type: call_type.map(str::to_owned),
            timestamp: None,
            duration,
        }
    }

    #[test]
    fn start_then_end_video_call() {
        let mut doc = StateDocument::default();

        let started = apply_call_event(
            &mut doc,
            &call(CallEvent::Started, Some("video"), None),
            NOW,
        );
        assert_eq!(
            started,
            CallTransition::Started {
                call_type: String::from("video")
            }
        );
        assert!(doc.in_call);
        assert_eq!(doc.status, ActivityStatus::OnCall);
        assert_eq!(doc.call_type.as_deref(), Some("video"));
        assert!(doc.call_start.is_some_and(|t| (t - NOW).abs() < f64::EPSILON));

        let ended = apply_call_event(
            &mut doc,
            &call(CallEvent::Ended, Some("video"), Some(125.0)),
            NOW,
        );
        assert!(!doc.in_call);
        assert_eq!(doc.status, ActivityStatus::Chilling);
        assert!(doc.call_type.is_none());
        assert!(doc
            .last_call_duration
            .is_some_and(|d| (d - 125.0).abs() < f64::EPSILON));

        match ended {
            CallTransition::Ended { memory, .. } => {
                assert!(memory.text.contains("2 minutes"));
                assert_eq!(
                    memory.text,
                    "Had a video call with boyfriend for 2 minutes"
                );
                assert_eq!(memory.context_chain_id, CALL_HISTORY_CONTEXT);
            }
            other => panic!("expected Ended, got {other:?}"),
        }
    }

    #[test]
    fn start_defaults_to_voice_and_now() {
        let mut doc = StateDocument::default();
        let report = CallReport {
            event: Some(CallEvent::Started),
            ..CallReport::default()
        };
        apply_call_event(&mut doc, &report, NOW);
        assert_eq!(doc.call_type.as_deref(), Some("voice"));
        assert!(doc.call_start.is_some_and(|t| (t - NOW).abs() < f64::EPSILON));
    }

    #[test]
    fn explicit_start_timestamp_is_kept() {
        let mut doc = StateDocument::default();
        let report = CallReport {
            event: Some(CallEvent::Started),
            timestamp: Some(99.0),
            ..CallReport::default()
        };
        apply_call_event(&mut doc, &report, NOW);
        assert!(doc.call_start.is_some_and(|t| (t - 99.0).abs() < f64::EPSILON));
    }

    #[test]
    fn end_while_idle_is_accepted() {
        let mut doc = StateDocument::default();
        let ended = apply_call_event(&mut doc, &call(CallEvent::Ended, None, None), NOW);

        assert!(doc.last_call_duration.is_some_and(|d| d.abs() < f64::EPSILON));
        match ended {
            CallTransition::Ended { memory, .. } => {
                assert_eq!(memory.text, "Had a voice call with boyfriend for 0 minutes");
            }
            other => panic!("expected Ended, got {other:?}"),
        }
    }

    #[test]
    fn unknown_or_missing_event_changes_nothing() {
        let mut doc = StateDocument::default();
        let before = doc.clone();

        let unknown = call(CallEvent::Unrecognized(String::from("call_held")), None, None);
        assert_eq!(apply_call_event(&mut doc, &unknown, NOW), CallTransition::Ignored);
        assert_eq!(
            apply_call_event(&mut doc, &CallReport::default(), NOW),
            CallTransition::Ignored
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn memory_minutes_truncate() {
        assert!(call_memory_text("voice", 59.9).ends_with("for 0 minutes"));
        assert!(call_memory_text("voice", 3600.0).ends_with("for 60 minutes"));
        assert!(call_memory_text("voice", -30.0).ends_with("for 0 minutes"));
    }
}
