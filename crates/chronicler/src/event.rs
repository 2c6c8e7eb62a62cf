//! Core event types for chronicler.
//!
//! This module defines the fundamental data structures for representing
//! usage events captured from instrumented call sites.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known event type tags.
///
/// The `event_type` field is an open enumeration: any string is accepted by
/// the collector, these are merely the tags emitted by the built-in
/// instrumentation hooks.
pub mod event_type {
    /// The document content changed.
    pub const CONTENT_CHANGED: &str = "content_changed";
    /// An instrumented control was clicked.
    pub const BUTTON_CLICK: &str = "button_click";
}

/// An opaque identifier correlating all events from one Chronicler instance.
///
/// Generated once at startup from a millisecond timestamp and a random
/// suffix. Never persisted; a restart always yields a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{}-{:08x}",
            Utc::now().timestamp_millis(),
            rand::random::<u32>()
        ))
    }

    /// View the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single usage event.
///
/// Events are immutable once constructed; the collector only ever appends
/// them. The payload shape depends on the event type and is deliberately
/// not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The session this event belongs to.
    pub session_id: SessionId,

    /// Open-enumeration tag, e.g. `content_changed` or `button_click`.
    pub event_type: String,

    /// Opaque event details, usually a JSON object.
    pub payload: Value,
}

impl Event {
    /// Create a new event for the given session.
    #[must_use]
    pub fn new(session_id: SessionId, event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            session_id,
            event_type: event_type.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_id_shape() {
        let id = SessionId::generate();
        let (timestamp, suffix) = id.as_str().split_once('-').expect("timestamp-suffix");
        assert!(timestamp.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn test_session_id_uniqueness() {
        // Two ids generated back-to-back share a timestamp but not a suffix.
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_display() {
        let id = SessionId::from("123-abc".to_string());
        assert_eq!(id.to_string(), "123-abc");
        assert_eq!(id.as_str(), "123-abc");
    }

    #[test]
    fn test_event_new() {
        let session = SessionId::from("s1".to_string());
        let event = Event::new(
            session.clone(),
            event_type::BUTTON_CLICK,
            json!({"task": "improve", "button_text": "Improve"}),
        );

        assert_eq!(event.session_id, session);
        assert_eq!(event.event_type, "button_click");
        assert_eq!(event.payload["task"], "improve");
    }

    #[test]
    fn test_event_wire_shape() {
        let event = Event::new(
            SessionId::from("s1".to_string()),
            event_type::CONTENT_CHANGED,
            json!({"text_length": 42}),
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "session_id": "s1",
                "event_type": "content_changed",
                "payload": {"text_length": 42},
            })
        );
    }

    #[test]
    fn test_non_object_payload_serializes_verbatim() {
        let event = Event::new(
            SessionId::from("s1".to_string()),
            "custom_type",
            json!("bare string"),
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["payload"], json!("bare string"));
    }

    #[test]
    fn test_event_roundtrip() {
        let event = Event::new(
            SessionId::from("s1".to_string()),
            "custom_type",
            json!({"k": true}),
        );
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
