//! Event collection and the pending batch.
//!
//! The collector owns the session id and the in-memory batch of events
//! awaiting transmission. It is purely synchronous; flush timing is the
//! scheduler's concern.

use serde_json::Value;

use crate::event::{Event, SessionId};

/// Collects events into an ordered pending batch.
///
/// The pending batch is the only mutable state in the pipeline. It is owned
/// exclusively by the collector until a flush swaps it out, so no locking
/// is needed.
#[derive(Debug)]
pub struct EventCollector {
    /// Session id stamped onto every event.
    session: SessionId,
    /// Events awaiting transmission, in insertion order.
    pending: Vec<Event>,
}

impl EventCollector {
    /// Create a collector with a freshly generated session id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(SessionId::generate())
    }

    /// Create a collector with an explicit session id.
    #[must_use]
    pub fn with_session(session: SessionId) -> Self {
        Self {
            session,
            pending: Vec::new(),
        }
    }

    /// The session id all events from this collector carry.
    #[must_use]
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Append an event to the pending batch.
    ///
    /// Any string tag and any payload are accepted; this is a logging sink,
    /// not a schema-enforcing API.
    pub fn log(&mut self, event_type: impl Into<String>, payload: Value) {
        self.pending
            .push(Event::new(self.session.clone(), event_type, payload));
    }

    /// Number of events currently pending.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the pending batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Swap the pending batch for a fresh empty one and return it.
    ///
    /// Events logged after this call start a new batch and are never part
    /// of the outgoing one.
    #[must_use]
    pub fn take_batch(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Return a failed batch to the front of the pending queue.
    ///
    /// The failed events keep their original relative order and sit ahead
    /// of anything logged since the batch was taken.
    pub fn requeue(&mut self, mut batch: Vec<Event>) {
        batch.append(&mut self.pending);
        self.pending = batch;
    }
}

impl Default for EventCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collector() -> EventCollector {
        EventCollector::with_session(SessionId::from("test-session".to_string()))
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut c = collector();
        c.log("a", json!({"n": 1}));
        c.log("b", json!({"n": 2}));
        c.log("c", json!({"n": 3}));

        let batch = c.take_batch();
        let types: Vec<&str> = batch.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, ["a", "b", "c"]);
    }

    #[test]
    fn test_events_carry_session_id() {
        let mut c = collector();
        c.log("a", json!({}));

        let batch = c.take_batch();
        assert_eq!(batch[0].session_id.as_str(), "test-session");
    }

    #[test]
    fn test_take_batch_empties_pending() {
        let mut c = collector();
        c.log("a", json!({}));
        assert_eq!(c.pending_len(), 1);

        let batch = c.take_batch();
        assert_eq!(batch.len(), 1);
        assert!(c.is_empty());
    }

    #[test]
    fn test_take_batch_when_empty() {
        let mut c = collector();
        assert!(c.take_batch().is_empty());
    }

    #[test]
    fn test_requeue_prepends_in_order() {
        let mut c = collector();
        c.log("b1", json!({}));
        c.log("b2", json!({}));
        let failed = c.take_batch();

        c.log("e1", json!({}));
        c.log("e2", json!({}));
        c.requeue(failed);

        let batch = c.take_batch();
        let types: Vec<&str> = batch.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, ["b1", "b2", "e1", "e2"]);
    }

    #[test]
    fn test_requeue_into_empty_pending() {
        let mut c = collector();
        c.log("a", json!({}));
        let failed = c.take_batch();

        c.requeue(failed);
        assert_eq!(c.pending_len(), 1);
    }
}
