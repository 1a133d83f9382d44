//! Error types for monoslide-midi.

use thiserror::Error;

/// Error type for MIDI output sequence operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Output sequence full: event needs {needed} bytes, {remaining} remaining")]
    OutputFull { needed: usize, remaining: usize },

    #[error("Empty MIDI message")]
    EmptyMessage,
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
