//! Error types for form schema translation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or translating a model schema.
#[derive(Debug, Error)]
pub enum TranslateError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid options in {path}: {source}")]
    InvalidOptions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Reference errors (exit code 2)
    #[error("definition not found: {name}")]
    DefinitionNotFound { name: String },

    #[error("invalid path in $ref: {reference}")]
    InvalidRefPath { reference: String },

    #[error("unsupported $ref path: {reference}")]
    UnsupportedRef { reference: String },

    #[error("circular $ref detected: {reference}")]
    CircularRef { reference: String },
}

impl TranslateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TranslateError::FileNotFound { .. }
            | TranslateError::ReadError { .. }
            | TranslateError::WriteError { .. } => 3,
            _ => 2,
        }
    }
}
