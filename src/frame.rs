//! Wire framing validation
//!
//! Each application-level message on the serial stream is framed as
//! `'!'` + JSON object + `'\n'`. This module checks a raw line against
//! those rules and strips the start marker, handing the JSON payload on
//! to the decoder.
//!
//! The framing has no escaping: a JSON payload that legitimately contains
//! an embedded newline (or a leading `!`) will be mis-framed by the line
//! split upstream. That is an ambiguity in the wire format itself, not
//! something this layer tries to repair.

use thiserror::Error;

/// Start-of-frame marker the bridge prefixes to every JSON line
pub const START_MARKER: char = '!';

/// Line terminator closing every frame
pub const TERMINATOR: char = '\n';

/// Rejection reasons for a badly framed line
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The line was empty (a timed-out or torn read)
    #[error("empty line from sensor bridge")]
    EmptyLine,

    /// The line did not begin with the `!` start marker
    #[error("badly framed line, missing '!' as starting char")]
    MissingStartMarker,

    /// The line did not end with the newline terminator
    #[error("badly framed line, missing newline as final char")]
    MissingTerminator,
}

/// Validate a raw line against the framing rules and strip the start marker.
///
/// Checks are ordered and the first failure wins: non-empty, then the
/// leading `!`, then the trailing newline. On success the returned payload
/// still carries the terminator; the decoder tolerates trailing whitespace.
pub fn validate(raw: &str) -> Result<&str, FrameError> {
    if raw.is_empty() {
        return Err(FrameError::EmptyLine);
    }
    if !raw.starts_with(START_MARKER) {
        return Err(FrameError::MissingStartMarker);
    }
    if !raw.ends_with(TERMINATOR) {
        return Err(FrameError::MissingTerminator);
    }
    Ok(&raw[START_MARKER.len_utf8()..])
}
