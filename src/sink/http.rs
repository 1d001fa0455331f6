//! HTTP reporting sink
//!
//! Forwards DATA messages to the configured reporting endpoint with a
//! blocking POST. The pipeline is synchronous by design, so a slow endpoint
//! stalls ingestion; the request timeout bounds how long.

use crate::error::{ReporterError, Result};
use crate::message::DecodedMessage;
use crate::sink::ReportSink;
use std::time::Duration;

/// Bound on a single POST, connection setup included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reporting sink that POSTs JSON messages to an HTTP endpoint
pub struct HttpSink {
    uri: String,
    agent: ureq::Agent,
}

impl HttpSink {
    /// Create a sink targeting the given URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    /// The destination URI this sink posts to
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl ReportSink for HttpSink {
    fn post(&self, msg: &DecodedMessage) -> Result<u16> {
        let body = serde_json::to_string(msg).map_err(|err| ReporterError::Sink(err.to_string()))?;
        let response = self
            .agent
            .post(&self.uri)
            .set("Content-Type", "application/json")
            .set("Accept", "text/plain")
            .send_string(&body);
        match response {
            Ok(resp) => Ok(resp.status()),
            // 4xx/5xx answers still carry a status worth logging
            Err(ureq::Error::Status(code, _)) => Ok(code),
            Err(err) => Err(ReporterError::Sink(err.to_string())),
        }
    }
}
