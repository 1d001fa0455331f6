//! Line sources for the pipeline
//!
//! A [`LineSource`] produces the raw newline-terminated lines the pipeline
//! consumes, from either the live serial link ([`SerialSource`]) or a
//! captured line file ([`ReplaySource`]). The trait is the seam that lets
//! tests drive the pipeline with scripted input.

pub mod replay;
pub mod serial;

pub use replay::ReplaySource;
pub use serial::SerialSource;

use crate::error::Result;

/// A blocking producer of raw lines
///
/// `next_line` returns `Ok(Some(line))` for the next raw line (terminator
/// included when one was read), `Ok(None)` on definitive end-of-input, or
/// `Err` for a transient read failure. Only a file-backed source ever yields
/// `Ok(None)`; a live serial source reports timeouts and torn reads as
/// transient errors and expects the caller to log and try again.
pub trait LineSource {
    /// Read the next raw line, blocking until one is available
    fn next_line(&mut self) -> Result<Option<String>>;
}
