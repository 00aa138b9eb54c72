//! Beast Arena simulator — application error types.

use beastarena_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the simulator.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be decoded, or the output could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The engine rejected the battle.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl AppError {
    /// Process exit code for this error, loosely following `sysexits.h`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 78,
            Self::Io(_) | Self::Domain(DomainError::Infrastructure(_)) => 74,
            Self::Serialization(_) | Self::Domain(DomainError::Content(_)) => 65,
            Self::Domain(DomainError::Validation(_)) => 64,
        }
    }
}
