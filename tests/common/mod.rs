//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use helm_reporter::message::DecodedMessage;
use serde_json::Value;

/// Turn a JSON literal into a decoded message map
pub fn as_message(value: Value) -> DecodedMessage {
    match value {
        Value::Object(map) => map,
        other => panic!("test message must be a JSON object, got {other}"),
    }
}
