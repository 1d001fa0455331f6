//! The main processing pipeline
//!
//! One synchronous loop: read a raw line, validate its framing, decode the
//! JSON payload, classify and dispatch it, then read the next line. Every
//! per-line failure is logged at error severity with the offending data and
//! the loop continues - no message is dropped without a log line, and no
//! error from processing one line escapes the loop.
//!
//! The loop terminates only when the source reports definitive end-of-input
//! (a replayed capture file reaching EOF); a live serial source reports
//! timeouts as transient errors and the loop retries.

use crate::dispatch::Dispatcher;
use crate::error::{ReporterError, Result};
use crate::source::LineSource;
use crate::{frame, message};

/// Counters for pipeline observability
///
/// Every line read ends up in exactly one of the outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Lines successfully read from the source
    pub lines_read: u64,
    /// Transient source read failures (timeouts, torn reads)
    pub read_errors: u64,
    /// Lines rejected by the frame validator
    pub frame_errors: u64,
    /// Payloads rejected by the JSON decoder
    pub decode_errors: u64,
    /// Messages violating the type-key invariant
    pub classify_errors: u64,
    /// Messages with no registered handler
    pub unhandled: u64,
    /// Messages whose handler failed
    pub handler_errors: u64,
    /// Messages dispatched successfully
    pub dispatched: u64,
}

/// The read/validate/decode/dispatch loop over one line source
pub struct Pipeline<S: LineSource> {
    source: S,
    dispatcher: Dispatcher,
    stats: PipelineStats,
}

impl<S: LineSource> Pipeline<S> {
    /// Assemble a pipeline from a source and a dispatcher
    pub fn new(source: S, dispatcher: Dispatcher) -> Self {
        Self {
            source,
            dispatcher,
            stats: PipelineStats::default(),
        }
    }

    /// Run until the source is exhausted, returning the final counters.
    ///
    /// Only source exhaustion ends the loop; read failures are transient
    /// and retried.
    pub fn run(mut self) -> Result<PipelineStats> {
        loop {
            let raw = match self.source.next_line() {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(%err, "read from line source failed, retrying");
                    self.stats.read_errors += 1;
                    continue;
                }
            };
            self.stats.lines_read += 1;
            self.process_line(&raw);
        }
        tracing::info!(stats = ?self.stats, "line source exhausted, pipeline done");
        Ok(self.stats)
    }

    /// Push a single raw line through validate/decode/dispatch.
    ///
    /// Failures are logged and counted here; nothing propagates to the
    /// caller, which is what keeps the loop alive across bad input.
    pub fn process_line(&mut self, raw: &str) {
        let payload = match frame::validate(raw) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(line = ?raw, %err, "rejected badly framed line");
                self.stats.frame_errors += 1;
                return;
            }
        };

        let msg = match message::decode(payload) {
            Ok(msg) => msg,
            Err(err) => {
                tracing::error!(line = ?raw, %err, "invalid JSON received, moving on");
                self.stats.decode_errors += 1;
                return;
            }
        };

        match self.dispatcher.dispatch(&msg) {
            Ok(kind) => {
                tracing::trace!(%kind, "message dispatched");
                self.stats.dispatched += 1;
            }
            Err(err @ ReporterError::Classify(_)) => {
                tracing::error!(line = ?raw, %err, "unclassifiable message");
                self.stats.classify_errors += 1;
            }
            Err(err @ ReporterError::NoHandler(_)) => {
                tracing::error!(line = ?raw, %err, "error in dispatch");
                self.stats.unhandled += 1;
            }
            Err(err) => {
                tracing::error!(line = ?raw, %err, "error in dispatch");
                self.stats.handler_errors += 1;
            }
        }
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}
