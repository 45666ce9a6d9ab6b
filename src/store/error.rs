use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("parameter file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read parameter file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse parameter file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("parameter '{0}' must be a string")]
    NonStringValue(String),
}
