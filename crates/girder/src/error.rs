//! Error types for girder operations.

use std::io;
use thiserror::Error;

use crate::domain::ArtifactId;

/// The error type for girder operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Artifact not found in the store.
    ///
    /// Raised by link operations whose preconditions require both endpoints
    /// to exist. Read-side analysis (impact, graphs) tolerates unknown IDs
    /// instead of raising this.
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(ArtifactId),
}

/// Errors from loading or validating workspace configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.girder` directory was found here or in any parent directory.
    #[error("Not a girder workspace (run 'girder init' first)")]
    NotInitialized,

    /// The workspace is already initialized.
    #[error("Already initialized: {0}")]
    AlreadyInitialized(String),

    /// The configuration file could not be parsed or contains bad values.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the artifact store and its persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file has a shape the store cannot use.
    #[error("Invalid store data: {0}")]
    InvalidFormat(String),

    /// A record failed to serialize or deserialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence backend reported a failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<girder_jsonl::Error> for StoreError {
    fn from(e: girder_jsonl::Error) -> Self {
        match e {
            girder_jsonl::Error::Json(e) => Self::Serialization(e),
            girder_jsonl::Error::InvalidFormat(msg) => Self::InvalidFormat(msg),
            girder_jsonl::Error::Io(e) => Self::Backend(e.to_string()),
        }
    }
}

/// A specialized Result type for girder operations.
pub type Result<T> = std::result::Result<T, Error>;
