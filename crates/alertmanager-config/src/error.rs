//! Error types for alertmanager config generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors that can occur while generating an Alertmanager configuration.
///
/// Every variant is terminal for a run: nothing is retried and no output
/// file is written.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The options file could not be read.
    #[error("failed to read options file {}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The options file is not a valid options document.
    #[error("failed to parse options file {}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A notification module lacks a field its type requires.
    #[error("notification module '{module}' is missing required field '{field}'")]
    MissingField { module: String, field: &'static str },

    /// A notification module field has the wrong JSON type.
    #[error("notification module '{module}' field '{field}' must be {expected}")]
    InvalidField {
        module: String,
        field: &'static str,
        expected: &'static str,
    },

    /// The generated configuration could not be encoded as YAML.
    #[error("failed to serialize alertmanager config")]
    Serialize(#[from] serde_yaml::Error),

    /// The output file could not be written.
    #[error("failed to write alertmanager config {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranslateError {
    pub(crate) fn missing(module: &str, field: &'static str) -> Self {
        Self::MissingField {
            module: module.to_string(),
            field,
        }
    }

    pub(crate) fn invalid(module: &str, field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField {
            module: module.to_string(),
            field,
            expected,
        }
    }
}
