//! Reporting sinks for DATA messages
//!
//! A [`ReportSink`] is the abstract destination DATA messages are forwarded
//! to. The production implementation is [`HttpSink`], a blocking JSON POST;
//! [`MemorySink`] records posts in memory for tests (and for dry runs when
//! the `mock-sink` feature is enabled).

pub mod http;
#[cfg(any(test, feature = "mock-sink"))]
pub mod memory;

pub use http::HttpSink;
#[cfg(any(test, feature = "mock-sink"))]
pub use memory::MemorySink;

use crate::error::Result;
use crate::message::DecodedMessage;

/// Destination for forwarded DATA messages
///
/// `post` delivers one JSON-serialized message and returns the integer
/// status code the destination answered with. Non-success statuses are
/// still `Ok` - the caller decides what to do with the code - while `Err`
/// means the message could not be delivered at all.
pub trait ReportSink: Send {
    /// Deliver one message, returning the destination's status code
    fn post(&self, msg: &DecodedMessage) -> Result<u16>;
}

/// Shared sinks are sinks too, so tests can keep a handle on a sink after
/// the DATA handler takes ownership of the other one
impl<S: ReportSink + ?Sized + Sync> ReportSink for std::sync::Arc<S> {
    fn post(&self, msg: &DecodedMessage) -> Result<u16> {
        (**self).post(msg)
    }
}
