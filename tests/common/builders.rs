//! Builders for framed wire lines

use serde_json::{json, Value};

/// Frame a JSON value as one wire line: `!` + JSON + newline
pub fn frame_line(value: &Value) -> String {
    format!("!{value}\n")
}

/// A well-formed DATA line with the given reading
pub fn data_line(kind: &str, value: impl Into<Value>, unit: &str, period: f64) -> String {
    frame_line(&json!({
        "DATA": {"type": kind, "value": value.into(), "unit": unit, "period": period}
    }))
}

/// A well-formed INFO line with the given text
pub fn info_line(text: &str) -> String {
    frame_line(&json!({ "INFO": text }))
}

/// A well-formed SENSORS_MANIFEST line for the given (name, url, connection)
/// triples
pub fn manifest_line(sensors: &[(&str, &str, &str)]) -> String {
    let entries: Vec<Value> = sensors
        .iter()
        .map(|(name, url, connection)| {
            json!({"name": name, "url": url, "connection": connection})
        })
        .collect();
    frame_line(&json!({ "SENSORS_MANIFEST": entries }))
}
