//! Persisted-document boundary for the effects dataset.
//!
//! The dataset lives in one UTF-8 JSON file with a top-level `effects`
//! array. It is read wholesale before any validation pass and written
//! wholesale after canonicalization; nothing else touches the disk.

mod document;
mod error;

pub use document::{
    DEFAULT_DOCUMENT_PATH, load_document, parse_document, render_document, save_document,
};
pub use error::{IngestError, Result};
