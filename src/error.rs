//! Errors raised by sinks
//!
//! These never escape a logging call. They are reported to the optional
//! error hook of a channel and as `tracing` events.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which sink a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => f.write_str("console"),
            SinkKind::File => f.write_str("file"),
        }
    }
}

/// A non-fatal sink failure
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create log directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path:?}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to {sink} sink")]
    Write {
        sink: SinkKind,
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Sink the error belongs to
    pub fn sink(&self) -> SinkKind {
        match self {
            SinkError::CreateDir { .. } | SinkError::OpenFile { .. } => SinkKind::File,
            SinkError::Write { sink, .. } => *sink,
        }
    }
}
