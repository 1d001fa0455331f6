//! Built-in message handlers
//!
//! One handler per message type. INFO/WARN/ERROR emit the body string
//! through the local log at the matching severity; DATA logs the reading
//! and forwards the full original message to the reporting sink;
//! SENSORS_MANIFEST enumerates the connected sensors.

use crate::dispatch::Handler;
use crate::error::{ReporterError, Result};
use crate::message::{DataRecord, DecodedMessage, ManifestEntry, MessageType};
use crate::sink::ReportSink;
use serde_json::Value;

/// Pull the body out from under the handler's own type key.
fn body<'a>(msg: &'a DecodedMessage, kind: MessageType) -> Result<&'a Value> {
    msg.get(kind.as_key()).ok_or_else(|| ReporterError::MalformedBody {
        kind,
        detail: format!("missing {:?} key", kind.as_key()),
    })
}

/// The body of a log-type message, which must be a string.
fn log_text<'a>(msg: &'a DecodedMessage, kind: MessageType) -> Result<&'a str> {
    body(msg, kind)?
        .as_str()
        .ok_or_else(|| ReporterError::MalformedBody {
            kind,
            detail: "body is not a string".to_string(),
        })
}

/// Logs INFO messages from the bridge at info severity
pub struct InfoHandler;

impl Handler for InfoHandler {
    fn handle(&self, msg: &DecodedMessage) -> Result<()> {
        let text = log_text(msg, MessageType::Info)?;
        tracing::info!(target: "bridge", "{}", text);
        Ok(())
    }
}

/// Logs WARN messages from the bridge at warn severity
pub struct WarnHandler;

impl Handler for WarnHandler {
    fn handle(&self, msg: &DecodedMessage) -> Result<()> {
        let text = log_text(msg, MessageType::Warn)?;
        tracing::warn!(target: "bridge", "{}", text);
        Ok(())
    }
}

/// Logs ERROR messages from the bridge at error severity
pub struct ErrorHandler;

impl Handler for ErrorHandler {
    fn handle(&self, msg: &DecodedMessage) -> Result<()> {
        let text = log_text(msg, MessageType::Error)?;
        tracing::error!(target: "bridge", "{}", text);
        Ok(())
    }
}

/// Logs DATA readings and forwards them to the reporting sink
///
/// The full original message (TIME included) is what gets forwarded, so the
/// reporting endpoint sees exactly what came off the wire. A sink failure
/// is logged here and does not propagate; only a malformed body fails the
/// handler.
pub struct DataHandler {
    sink: Box<dyn ReportSink>,
}

impl DataHandler {
    /// Create a DATA handler forwarding to the given sink
    pub fn new(sink: Box<dyn ReportSink>) -> Self {
        Self { sink }
    }
}

impl Handler for DataHandler {
    fn handle(&self, msg: &DecodedMessage) -> Result<()> {
        let record: DataRecord = serde_json::from_value(body(msg, MessageType::Data)?.clone())
            .map_err(|err| ReporterError::MalformedBody {
                kind: MessageType::Data,
                detail: err.to_string(),
            })?;
        tracing::info!(
            target: "bridge",
            "{}: {} {} over {} ms",
            record.kind,
            display_value(&record.value),
            record.unit,
            record.period
        );
        match self.sink.post(msg) {
            Ok(status) => {
                tracing::debug!(status, "posted DATA message to reporting sink");
            }
            Err(err) => {
                tracing::error!(%err, "failed to post DATA message to reporting sink");
            }
        }
        Ok(())
    }
}

/// Logs one line per sensor in a SENSORS_MANIFEST message
pub struct ManifestHandler;

impl Handler for ManifestHandler {
    fn handle(&self, msg: &DecodedMessage) -> Result<()> {
        let entries: Vec<ManifestEntry> =
            serde_json::from_value(body(msg, MessageType::SensorsManifest)?.clone()).map_err(
                |err| ReporterError::MalformedBody {
                    kind: MessageType::SensorsManifest,
                    detail: err.to_string(),
                },
            )?;
        for sensor in &entries {
            tracing::info!(
                target: "bridge",
                "{} ({}) connected on {}",
                sensor.name,
                sensor.url,
                sensor.connection
            );
        }
        Ok(())
    }
}

/// Render a reading value without JSON string quoting
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
