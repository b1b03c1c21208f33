//! Loading model schemas and translation options from disk or strings.

use std::path::Path;

use serde_json::Value;

use crate::error::TranslateError;
use crate::types::TranslateOptions;

/// Load a model schema from a file path.
///
/// # Errors
///
/// Returns `TranslateError::FileNotFound` if the file doesn't exist,
/// or `TranslateError::InvalidJson` if the file isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, TranslateError> {
    let content = read_file(path)?;
    load_document_str(&content)
}

/// Load a model schema from a JSON string.
///
/// # Errors
///
/// Returns `TranslateError::InvalidJson` if the string isn't valid JSON.
pub fn load_document_str(content: &str) -> Result<Value, TranslateError> {
    serde_json::from_str(content).map_err(|source| TranslateError::InvalidJson { source })
}

/// Load translation options from a JSON file.
///
/// Missing fields take their defaults.
///
/// # Errors
///
/// Returns `TranslateError::InvalidOptions` for malformed JSON or unknown fields.
pub fn load_options(path: &Path) -> Result<TranslateOptions, TranslateError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| TranslateError::InvalidOptions {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, TranslateError> {
    if !path.exists() {
        return Err(TranslateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), "reading file");
    std::fs::read_to_string(path).map_err(|source| TranslateError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}
