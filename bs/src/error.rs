//! Blob store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during blob store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid key '{0}': use letters, digits, '_', '-' or '.' and do not start with '.'")]
    InvalidKey(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this is a key validation error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, StoreError::InvalidKey(_))
    }
}
