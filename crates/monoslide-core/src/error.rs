//! Error types for monoslide-core.

use thiserror::Error;

/// Error type for monoslide-core operations.
///
/// Only construction and configuration can fail; block processing recovers
/// locally from every condition it meets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid tempo: {0}. Must be positive and finite")]
    InvalidTempo(f32),

    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
