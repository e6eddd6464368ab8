#![forbid(unsafe_code)]

//! Console error type.

use std::path::PathBuf;

/// Anything that can abort the console binary.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
