//! File-backed line source for replaying captured bridge output
//!
//! Used by the `--replay` flag to run the pipeline against a capture file
//! instead of live hardware. Unlike the serial source, end-of-file here is
//! definitive: the source yields `Ok(None)` and the pipeline terminates
//! cleanly.

use crate::error::Result;
use crate::source::LineSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line source backed by a captured line file
pub struct ReplaySource {
    reader: BufReader<File>,
}

impl ReplaySource {
    /// Open a capture file for replay
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(file = %path.display(), "replaying capture file instead of live data");
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl LineSource for ReplaySource {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}
