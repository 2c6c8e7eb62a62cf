//! Async service layer driving the flush scheduler.
//!
//! A single worker task owns the scheduler and serializes all pipeline
//! operations, mirroring the single-threaded event-loop model of the host.
//! Call sites hold a cheap, cloneable [`Chronicler`] handle; logging never
//! blocks and never fails observably.

use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::event::event_type;
use crate::scheduler::FlushScheduler;
use crate::transport::{HttpTransport, Transport};

/// Operations accepted by the worker task.
#[derive(Debug)]
enum Command {
    Log { event_type: String, payload: Value },
    Flush,
    Shutdown(oneshot::Sender<()>),
}

/// Handle to the event pipeline.
///
/// Cloning is cheap; all clones feed the same worker and the same session.
/// Dropping every handle triggers the same final flush as [`shutdown`],
/// but without the acknowledgement.
///
/// [`shutdown`]: Chronicler::shutdown
#[derive(Debug, Clone)]
pub struct Chronicler {
    tx: mpsc::UnboundedSender<Command>,
}

impl Chronicler {
    /// Spawn the pipeline worker with the given transport.
    ///
    /// Must be called within a tokio runtime. The returned join handle
    /// resolves once the worker has performed its final flush.
    #[must_use]
    pub fn spawn<T>(config: &Config, transport: T) -> (Self, JoinHandle<()>)
    where
        T: Transport + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = FlushScheduler::new(config, transport);
        info!(session = %scheduler.session(), "chronicler started");
        let worker = tokio::spawn(run(scheduler, rx));
        (Self { tx }, worker)
    }

    /// Spawn the pipeline with the built-in HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be constructed from the
    /// configuration.
    pub fn spawn_http(config: &Config) -> Result<(Self, JoinHandle<()>)> {
        let transport = HttpTransport::new(&config.transport)?;
        Ok(Self::spawn(config, transport))
    }

    /// Record an event.
    ///
    /// Accepts any type tag and payload; never blocks. Events logged after
    /// shutdown are silently dropped, matching the torn-down-page case.
    pub fn log(&self, event_type: impl Into<String>, payload: Value) {
        let _ = self.tx.send(Command::Log {
            event_type: event_type.into(),
            payload,
        });
    }

    /// Record a `content_changed` event from the editor collaborator.
    pub fn content_changed(&self, text_length: usize) {
        self.log(
            event_type::CONTENT_CHANGED,
            json!({ "text_length": text_length }),
        );
    }

    /// Record a `button_click` event from an instrumented control.
    pub fn button_click(&self, task: &str, button_text: &str) {
        self.log(
            event_type::BUTTON_CLICK,
            json!({ "task": task, "button_text": button_text }),
        );
    }

    /// Request a flush of whatever is currently pending.
    pub fn flush(&self) {
        let _ = self.tx.send(Command::Flush);
    }

    /// Tear the pipeline down, flushing any buffered events first.
    ///
    /// Resolves once the worker has issued the final flush. Safe to call
    /// when the worker is already gone.
    pub async fn shutdown(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Shutdown(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }
}

/// Worker loop: commands in, timer-paced flushes out.
///
/// The select re-derives the timer arm from the scheduler's deadline on
/// every iteration, so restarting the timer on a new event is simply a
/// matter of the scheduler moving its deadline.
async fn run<T: Transport>(
    mut scheduler: FlushScheduler<T>,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    loop {
        let deadline = scheduler.deadline();
        tokio::select! {
            cmd = rx.recv() => match cmd {
                Some(Command::Log { event_type, payload }) => {
                    scheduler.log(event_type, payload);
                }
                Some(Command::Flush) => scheduler.flush(),
                Some(Command::Shutdown(ack)) => {
                    scheduler.handle_teardown();
                    let _ = ack.send(());
                    break;
                }
                None => {
                    // Every handle dropped: treat as teardown.
                    scheduler.handle_teardown();
                    break;
                }
            },
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                scheduler.handle_idle_timeout();
            }
        }
    }
    info!("chronicler stopped");
}
