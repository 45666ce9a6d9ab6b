use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the conversion engine.
///
/// Every variant is structural: the input or the requested strategy is
/// inconsistent, so conversion stops and no partial output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("key '{key}' conflicts with a value already placed on its path")]
    PathConflict { key: String },

    #[error("blueprint references missing key '{key}'")]
    MissingKey { key: String },

    #[error("unsupported convert mode '{0}'")]
    UnsupportedMode(String),
}

impl ConvertError {
    pub(crate) fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a blueprint document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlueprintError {
    #[error("blueprint file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read blueprint file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse blueprint: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("blueprint must be a JSON object at the top level")]
    NotAnObject,
}
