//! `chronicler` - buffered, batched delivery of client usage events
//!
//! This library captures discrete usage events from instrumented call sites,
//! batches them in memory per session, and delivers them to a remote HTTP
//! collector with fire-and-forget semantics. Batches are flushed when they
//! reach a size threshold, after an inactivity window, and unconditionally
//! at teardown, which may be the last moment the host lets us run.
//!
//! ```no_run
//! use chronicler::{Chronicler, Config};
//!
//! # async fn example() -> chronicler::Result<()> {
//! chronicler::init_logging();
//!
//! let config = Config::load()?;
//! let (chronicler, _worker) = Chronicler::spawn_http(&config)?;
//!
//! chronicler.content_changed(1024);
//! chronicler.button_click("improve", "Improve");
//!
//! // Final flush on the way out.
//! chronicler.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod collector;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod scheduler;
pub mod service;
pub mod transport;

pub use collector::EventCollector;
pub use config::Config;
pub use error::{Error, Result};
pub use event::{Event, SessionId};
pub use logging::init_logging;
pub use scheduler::FlushScheduler;
pub use service::Chronicler;
pub use transport::{HttpTransport, Transport};
