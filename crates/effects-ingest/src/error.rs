//! Error types for dataset document I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the dataset document.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Document file does not exist.
    #[error("document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Document exists but could not be read.
    #[error("failed to read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON or lacks the `effects` collection.
    #[error("malformed document {path}: {message}")]
    DocumentMalformed { path: PathBuf, message: String },

    /// Failed to write the document back.
    #[error("failed to write document {path}: {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the document as JSON.
    #[error("failed to encode document: {message}")]
    Encode { message: String },
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, IngestError>;
