//! In-memory recording sink for testing
//!
//! Records every posted message and answers with a configurable status
//! code, or fails every post when configured to, so tests can exercise both
//! sides of the DATA handler's forwarding contract without a live endpoint.

use crate::error::{ReporterError, Result};
use crate::message::DecodedMessage;
use crate::sink::ReportSink;
use std::sync::Mutex;

/// Recording sink that keeps every posted message in memory
pub struct MemorySink {
    posted: Mutex<Vec<DecodedMessage>>,
    status: u16,
    fail: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// Create a sink that accepts every post with status 200
    pub fn new() -> Self {
        Self {
            posted: Mutex::new(Vec::new()),
            status: 200,
            fail: false,
        }
    }

    /// Answer every post with the given status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Fail every post with a transport error
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Messages posted so far, in order
    pub fn posted(&self) -> Vec<DecodedMessage> {
        self.posted.lock().expect("sink poisoned").clone()
    }
}

impl ReportSink for MemorySink {
    fn post(&self, msg: &DecodedMessage) -> Result<u16> {
        if self.fail {
            return Err(ReporterError::Sink("simulated transport failure".to_string()));
        }
        self.posted.lock().expect("sink poisoned").push(msg.clone());
        Ok(self.status)
    }
}
