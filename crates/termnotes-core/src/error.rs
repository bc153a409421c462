//! Error types for termnotes core operations.
//!
//! Unknown note ids are not errors: lookups return `Option` and mutations
//! return `bool`. Everything here is either a problem with the request
//! itself or a failure of the crypto/storage layers underneath it.

use thiserror::Error;

/// Result type alias for termnotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type for termnotes operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Missing or malformed argument (empty content, non-numeric id, ...)
    #[error("Usage error: {0}")]
    Usage(String),

    /// Import payload is not a recognized collection shape
    #[error("Format error: {0}")]
    Format(String),

    /// Envelope parsed but could not be authenticated or decrypted
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl NotesError {
    /// True for errors caused by the caller's arguments rather than the store.
    pub fn is_usage(&self) -> bool {
        matches!(self, NotesError::Usage(_) | NotesError::Format(_))
    }
}
