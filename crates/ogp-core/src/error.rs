//! # Error Types
//!
//! `OgpError` is the shared error type for foundational operations.
//! `DocumentError` carries the file path for failures while loading a
//! document from disk, so CLI output can name the offending file.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the toolkit.
#[derive(Error, Debug)]
pub enum OgpError {
    /// A timestamp string could not be accepted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Document loading failed.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors raised while loading a YAML or JSON document from a file.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file does not exist.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl DocumentError {
    /// The path of the document that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path }
            | Self::Read { path, .. }
            | Self::YamlParse { path, .. }
            | Self::JsonParse { path, .. } => path,
        }
    }
}
