//! Message data model, decoding, and classification
//!
//! A decoded message is a JSON object with exactly one key that is not the
//! reserved `TIME` key; that key names the message type and its value is the
//! message body. The optional `TIME` sibling is extracted on demand and
//! carries no further semantics (no ordering, deduplication, or staleness
//! checks are derived from it).
//!
//! # Message types
//!
//! - `INFO` / `WARN` / `ERROR` - a log string, emitted locally at the
//!   matching severity
//! - `DATA` - a [`DataRecord`] reading, forwarded to the reporting sink
//! - `SENSORS_MANIFEST` - a list of [`ManifestEntry`] sent once at startup

use crate::error::{ReporterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The reserved key carrying the bridge's timestamp, never a message type
pub const TIME_KEY: &str = "TIME";

/// A decoded wire message: one JSON object per line
pub type DecodedMessage = serde_json::Map<String, Value>;

/// The closed set of message types the bridge emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Informational log message
    Info,
    /// Warning log message
    Warn,
    /// Error log message
    Error,
    /// A sensor reading to forward to the reporting sink
    Data,
    /// Startup enumeration of connected sensors
    SensorsManifest,
}

impl MessageType {
    /// Map a wire type key to a message type, if recognized
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            "DATA" => Some(Self::Data),
            "SENSORS_MANIFEST" => Some(Self::SensorsManifest),
            _ => None,
        }
    }

    /// The wire key for this message type
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Data => "DATA",
            Self::SensorsManifest => "SENSORS_MANIFEST",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Classification failures: the type-key arity invariant was violated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// The message had no key besides (at most) `TIME`
    #[error("message has no type key")]
    MissingType,

    /// The message had more than one non-`TIME` key
    #[error("message has multiple type keys: {0:?}")]
    MultipleTypes(Vec<String>),

    /// The dedicated time query found no `TIME` key
    #[error("message has no TIME key")]
    MissingTime,
}

/// Body of a `DATA` message: a single sensor reading
///
/// Only field presence is enforced; `value` stays a raw JSON value since the
/// bridge sends either a number or a string depending on the sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Sensor quantity, e.g. "temp" or "salinity"
    #[serde(rename = "type")]
    pub kind: String,
    /// The reading itself (number or string)
    pub value: Value,
    /// Unit of the reading, e.g. "C"
    pub unit: String,
    /// Sampling period in milliseconds
    pub period: f64,
}

/// One element of a `SENSORS_MANIFEST` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Human-readable sensor name
    pub name: String,
    /// Datasheet or driver URL for the sensor
    pub url: String,
    /// Bus/pin the sensor is attached to
    pub connection: String,
}

/// Decode a framed payload as a strict JSON object.
///
/// Trailing whitespace (the frame terminator the validator leaves in place)
/// is trimmed first. Anything that is not a syntactically valid JSON object
/// is rejected wholesale; there is no lenient recovery.
pub fn decode(payload: &str) -> Result<DecodedMessage> {
    let trimmed = payload.trim();
    serde_json::from_str::<DecodedMessage>(trimmed).map_err(|source| ReporterError::Decode {
        payload: trimmed.to_string(),
        source,
    })
}

/// Classify a decoded message, returning its type key and body.
///
/// The keys are partitioned into the reserved `TIME` key and everything
/// else; exactly one non-`TIME` key must remain. The check is a deterministic
/// arity test, independent of key order.
pub fn classify(msg: &DecodedMessage) -> std::result::Result<(&str, &Value), ClassifyError> {
    let mut type_keys = msg.iter().filter(|(key, _)| key.as_str() != TIME_KEY);
    match (type_keys.next(), type_keys.next()) {
        (Some((key, body)), None) => Ok((key.as_str(), body)),
        (None, _) => Err(ClassifyError::MissingType),
        (Some(_), Some(_)) => Err(ClassifyError::MultipleTypes(
            msg.keys()
                .filter(|key| key.as_str() != TIME_KEY)
                .cloned()
                .collect(),
        )),
    }
}

/// Extract the optional `TIME` value from a message.
///
/// Absence is only an error here, in the dedicated query; the dispatch path
/// never requires the field.
pub fn message_time(msg: &DecodedMessage) -> std::result::Result<&Value, ClassifyError> {
    msg.get(TIME_KEY).ok_or(ClassifyError::MissingTime)
}
