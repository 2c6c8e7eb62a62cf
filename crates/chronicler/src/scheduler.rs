//! Flush scheduling for the pending batch.
//!
//! The scheduler decides *when* a batch is handed to the transport: as soon
//! as it reaches the size threshold, after an inactivity window with no new
//! events, or unconditionally at teardown. It is a synchronous state
//! machine; the async layer in [`crate::service`] drives its deadline.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::collector::EventCollector;
use crate::config::Config;
use crate::event::SessionId;
use crate::transport::Transport;

/// Applies the flush policy to the collector's pending batch.
///
/// Invariant: at most one live flush timer at a time. The timer is
/// represented as a single `Option<Instant>` deadline, re-armed on every
/// logged event and cleared by every flush, so a stale timer cannot
/// trigger a duplicate flush.
#[derive(Debug)]
pub struct FlushScheduler<T> {
    collector: EventCollector,
    transport: T,
    /// Pending-batch size that triggers an immediate flush.
    batch_threshold: usize,
    /// Inactivity window before a partial batch is flushed.
    idle_delay: Duration,
    /// Deadline of the live flush timer, if one is armed.
    deadline: Option<Instant>,
}

impl<T: Transport> FlushScheduler<T> {
    /// Create a scheduler with a freshly generated session.
    #[must_use]
    pub fn new(config: &Config, transport: T) -> Self {
        Self::with_collector(config, transport, EventCollector::new())
    }

    /// Create a scheduler around an existing collector.
    #[must_use]
    pub fn with_collector(config: &Config, transport: T, collector: EventCollector) -> Self {
        Self {
            collector,
            transport,
            batch_threshold: config.flush.batch_threshold,
            idle_delay: config.idle_delay(),
            deadline: None,
        }
    }

    /// The session id stamped onto every event.
    #[must_use]
    pub fn session(&self) -> &SessionId {
        self.collector.session()
    }

    /// Number of events currently pending.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.collector.pending_len()
    }

    /// Deadline of the live flush timer, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record an event and apply the flush policy.
    ///
    /// Reaching the size threshold flushes immediately; otherwise the
    /// inactivity timer is restarted from now.
    pub fn log(&mut self, event_type: impl Into<String>, payload: Value) {
        self.collector.log(event_type, payload);

        if self.collector.pending_len() >= self.batch_threshold {
            self.flush();
        } else {
            self.deadline = Some(Instant::now() + self.idle_delay);
        }
    }

    /// The inactivity timer fired: flush whatever is pending.
    pub fn handle_idle_timeout(&mut self) {
        debug!(pending = self.collector.pending_len(), "inactivity timer fired");
        self.flush();
    }

    /// The host is tearing down: last chance to deliver buffered events.
    ///
    /// Bypasses both the size threshold and the timer. An empty batch
    /// produces no transport call.
    pub fn handle_teardown(&mut self) {
        debug!(pending = self.collector.pending_len(), "teardown flush");
        self.flush();
    }

    /// Hand the pending batch to the transport.
    ///
    /// The batch is swapped out *before* the send, so events logged while
    /// the send is in flight start a new batch. If the transport cannot
    /// enqueue the batch, its events are put back at the front of the
    /// queue and the retry is paced by a restarted inactivity timer.
    pub fn flush(&mut self) {
        self.deadline = None;
        if self.collector.is_empty() {
            return;
        }

        let batch = self.collector.take_batch();
        let event_count = batch.len();
        match self.transport.send(&batch) {
            Ok(()) => {
                debug!(event_count, "batch handed to transport");
            }
            Err(e) => {
                warn!(event_count, error = %e, "could not enqueue batch, re-queueing");
                self.collector.requeue(batch);
                self.deadline = Some(Instant::now() + self.idle_delay);
            }
        }
    }
}
