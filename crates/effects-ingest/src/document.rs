use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use effects_model::EffectsDocument;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Well-known location of the dataset, relative to the repository root.
pub const DEFAULT_DOCUMENT_PATH: &str = "data/effects.json";

/// Read and parse the dataset document.
pub fn load_document(path: &Path) -> Result<EffectsDocument> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => IngestError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::DocumentRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let document = parse_document(path, &content)?;
    info!(
        path = %path.display(),
        record_count = document.len(),
        "loaded effects document"
    );
    Ok(document)
}

/// Parse document text; `path` is only used for error context.
pub fn parse_document(path: &Path, content: &str) -> Result<EffectsDocument> {
    serde_json::from_str(content).map_err(|err| IngestError::DocumentMalformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Encode the document the way it is stored: two-space indentation,
/// non-ASCII characters kept literal, terminated by a newline.
pub fn render_document(document: &EffectsDocument) -> Result<String> {
    let mut text = serde_json::to_string_pretty(document).map_err(|err| IngestError::Encode {
        message: err.to_string(),
    })?;
    text.push('\n');
    Ok(text)
}

/// Write the whole document back to `path`.
pub fn save_document(path: &Path, document: &EffectsDocument) -> Result<()> {
    let text = render_document(document)?;
    fs::write(path, &text).map_err(|source| IngestError::DocumentWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote effects document");
    info!(
        path = %path.display(),
        record_count = document.len(),
        "saved effects document"
    );
    Ok(())
}
