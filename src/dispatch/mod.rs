//! Message dispatch
//!
//! The [`HandlerRegistry`] maps each [`MessageType`] to its handler. It is
//! built once at startup and injected into the [`Dispatcher`] - there is no
//! process-wide handler table, and tests can assemble partial registries to
//! exercise the no-handler path for otherwise recognized types.
//!
//! The dispatcher contains failures: an unrecognized type key or a handler
//! error is returned to the pipeline loop as a value, where it is logged
//! and the next line is processed. One bad message never takes the pipeline
//! down.

pub mod handlers;

pub use handlers::{
    DataHandler, ErrorHandler, InfoHandler, ManifestHandler, WarnHandler,
};

use crate::error::{ReporterError, Result};
use crate::message::{self, DecodedMessage, MessageType};
use crate::sink::ReportSink;
use std::collections::HashMap;

/// A type-specific message handler
///
/// Handlers receive the full decoded message (the original payload,
/// including `TIME` when present) and extract their own body, mirroring the
/// wire schema where the body sits under the type's own key.
pub trait Handler: Send {
    /// Process one message of this handler's type
    fn handle(&self, msg: &DecodedMessage) -> Result<()>;
}

/// Immutable mapping from message type to handler
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<MessageType, Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard registry: local logging for INFO/WARN/ERROR,
    /// sink forwarding for DATA, enumeration for SENSORS_MANIFEST
    pub fn with_defaults(sink: Box<dyn ReportSink>) -> Self {
        Self::new()
            .with(MessageType::Info, InfoHandler)
            .with(MessageType::Warn, WarnHandler)
            .with(MessageType::Error, ErrorHandler)
            .with(MessageType::Data, DataHandler::new(sink))
            .with(MessageType::SensorsManifest, ManifestHandler)
    }

    /// Register a handler for a message type (builder style)
    pub fn with(mut self, kind: MessageType, handler: impl Handler + 'static) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Look up the handler for a message type
    pub fn get(&self, kind: MessageType) -> Option<&dyn Handler> {
        self.handlers.get(&kind).map(|h| h.as_ref())
    }
}

/// Routes classified messages to their registered handlers
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over an assembled registry
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Classify a decoded message and invoke its handler.
    ///
    /// Returns the message type that was handled, or the contained failure:
    /// [`ReporterError::Classify`] when the type-key invariant is violated,
    /// [`ReporterError::NoHandler`] for an unrecognized or unregistered
    /// type, and [`ReporterError::Handler`] wrapping whatever the handler
    /// itself failed with.
    pub fn dispatch(&self, msg: &DecodedMessage) -> Result<MessageType> {
        let (key, _body) = message::classify(msg)?;
        let kind = MessageType::from_key(key)
            .ok_or_else(|| ReporterError::NoHandler(key.to_string()))?;
        let handler = self
            .registry
            .get(kind)
            .ok_or_else(|| ReporterError::NoHandler(key.to_string()))?;
        handler.handle(msg).map_err(|err| ReporterError::Handler {
            kind,
            message: err.to_string(),
        })?;
        Ok(kind)
    }
}
