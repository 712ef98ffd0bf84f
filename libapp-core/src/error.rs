//! Error types for Libapp Core

use thiserror::Error;

/// Result type alias using LibraryError
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Top-level error type for all catalog operations
///
/// The first three variants are the domain errors a caller is expected to
/// report back to the user. `Storage` is an operational fault and is never
/// caught inside the crate.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LibraryError {
    pub(crate) fn not_found(isbn: &str) -> Self {
        Self::NotFound(format!("Book with ISBN {} not found", isbn))
    }

    pub(crate) fn already_exists(isbn: &str) -> Self {
        Self::AlreadyExists(format!("Book with ISBN {} already exists", isbn))
    }

    /// Whether this is one of the domain errors rather than a storage fault
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Errors raised by the persistence adapter
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog data: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
