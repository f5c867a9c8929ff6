//! Storage-specific error type wrapping file and JSON errors.

use std::path::PathBuf;

use homegate_domain::error::GatewayError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the database file failed.
    #[error("unable to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the database document.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for GatewayError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
