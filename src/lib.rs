//! # Helm Reporter: serial-to-HTTP telemetry bridge reader
//!
//! Reads line-delimited JSON telemetry from the helm sensor bridge over a
//! serial link, validates and classifies each message, and routes it to
//! type-specific handling: local logging for INFO/WARN/ERROR, forwarding to
//! an HTTP endpoint for DATA readings, and sensor enumeration for the
//! startup SENSORS_MANIFEST.
//!
//! ## Architecture
//!
//! Data flows one direction through a single synchronous loop:
//!
//! ```text
//! LineSource -> frame::validate -> message::decode -> Dispatcher -> Handler
//! ```
//!
//! - [`source`] - the [`source::LineSource`] seam over the live serial link
//!   (with the reset/start handshake) or a replayed capture file
//! - [`frame`] - wire framing rules (`!` + JSON object + newline)
//! - [`message`] - the message data model, strict JSON decoding, and
//!   type-key classification
//! - [`dispatch`] - the immutable handler registry and the dispatcher that
//!   contains per-message failures
//! - [`sink`] - the [`sink::ReportSink`] seam over the HTTP reporting
//!   endpoint
//! - [`pipeline`] - the main loop with its continue-on-error policy
//!
//! Every stage's outcome is an explicit `Result` variant, so "log and move
//! on to the next line" is an ordinary branch in the loop rather than an
//! unwind path. A single bad message - badly framed, unparseable,
//! unclassifiable, unrecognized, or with a failing handler - never stops
//! the pipeline.
//!
//! ## Example
//!
//! ```no_run
//! use helm_reporter::config::Config;
//! use helm_reporter::dispatch::{Dispatcher, HandlerRegistry};
//! use helm_reporter::pipeline::Pipeline;
//! use helm_reporter::sink::HttpSink;
//! use helm_reporter::source::SerialSource;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     let sink = HttpSink::new(config.network.report_uri.clone());
//!     let registry = HandlerRegistry::with_defaults(Box::new(sink));
//!     let source = SerialSource::open(&config.serial)?;
//!     let stats = Pipeline::new(source, Dispatcher::new(registry)).run()?;
//!     println!("processed {} lines", stats.lines_read);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod message;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use error::{ReporterError, Result};
pub use frame::FrameError;
pub use message::{ClassifyError, DataRecord, DecodedMessage, ManifestEntry, MessageType};
pub use pipeline::{Pipeline, PipelineStats};
