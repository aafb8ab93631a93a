//! Error types for time-announce

use std::io;
use thiserror::Error;

/// Main error type for time-announce
#[derive(Error, Debug)]
pub enum AnnounceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Socket error: {0}")]
    Socket(String),

    /// A packet send failed mid-stream; the rest of the buffer was dropped
    #[error("Transmission aborted at frame {frame} after {sent} packets: {source}")]
    Transmit {
        frame: usize,
        sent: usize,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for time-announce operations
pub type Result<T> = std::result::Result<T, AnnounceError>;

impl From<String> for AnnounceError {
    fn from(s: String) -> Self {
        AnnounceError::Other(s)
    }
}

impl From<&str> for AnnounceError {
    fn from(s: &str) -> Self {
        AnnounceError::Other(s.to_string())
    }
}
