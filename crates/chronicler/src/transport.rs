//! Batch delivery to the remote collector.
//!
//! The transport seam separates the flush policy from the delivery
//! mechanism. The built-in [`HttpTransport`] POSTs batches fire-and-forget;
//! tests substitute in-process implementations.

use tracing::{debug, trace};

use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::event::Event;

/// Capability interface for delivering a batch of events.
///
/// `send` must return without waiting for the remote collector: `Ok(())`
/// means only that the platform accepted the payload for transmission.
/// Whether the collector ever receives it is unobservable by design.
pub trait Transport: Send {
    /// Submit a batch for best-effort delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch could not even be enqueued (failed
    /// serialization or a rejected submission). The scheduler responds by
    /// re-queueing the events; the transport itself never retries.
    fn send(&self, batch: &[Event]) -> Result<()>;
}

/// Fire-and-forget HTTP delivery to a collector endpoint.
///
/// Serializes the batch as a JSON array and hands the POST to a detached
/// background task. Neither the HTTP status nor the response body is
/// inspected; the request merely has to outlive the caller, which is what
/// makes this primitive safe to invoke during teardown.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// Build a transport for the configured collector endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let endpoint = reqwest::Url::parse(&config.endpoint).map_err(|e| {
            Error::ConfigValidation {
                message: format!("invalid endpoint URL {}: {e}", config.endpoint),
            }
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::transport_enqueue(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// The endpoint batches are delivered to.
    #[must_use]
    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, batch: &[Event]) -> Result<()> {
        let body = serde_json::to_vec(batch)?;

        // tokio::spawn panics outside a runtime; resolve the handle first so
        // a missing runtime surfaces as an enqueue failure instead.
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::transport_enqueue(format!("no async runtime: {e}")))?;

        let request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        let event_count = batch.len();
        runtime.spawn(async move {
            // Best-effort: status and body are deliberately ignored.
            match request.send().await {
                Ok(response) => {
                    trace!(event_count, status = %response.status(), "batch submitted");
                }
                Err(e) => {
                    debug!(event_count, error = %e, "batch delivery failed silently");
                }
            }
        });

        debug!(event_count, "batch enqueued for delivery");
        Ok(())
    }
}
