//! Mock construction helpers

use helm_reporter::error::{ReporterError, Result};
use helm_reporter::message::DecodedMessage;
use helm_reporter::sink::ReportSink;
use helm_reporter::source::LineSource;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Line source yielding a scripted sequence of lines, then end-of-input
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Recording sink with a configurable status code
///
/// Clone-as-Arc so the test keeps a handle after the DATA handler takes
/// ownership of the one inside the registry.
#[derive(Clone)]
pub struct RecordingSink {
    posted: Arc<Mutex<Vec<DecodedMessage>>>,
    status: u16,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            posted: Arc::new(Mutex::new(Vec::new())),
            status: 200,
            fail: false,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn posted(&self) -> Vec<DecodedMessage> {
        self.posted.lock().expect("sink poisoned").clone()
    }
}

impl ReportSink for RecordingSink {
    fn post(&self, msg: &DecodedMessage) -> Result<u16> {
        if self.fail {
            return Err(ReporterError::Sink("simulated transport failure".to_string()));
        }
        self.posted.lock().expect("sink poisoned").push(msg.clone());
        Ok(self.status)
    }
}
