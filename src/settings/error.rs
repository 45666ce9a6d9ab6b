use std::path::PathBuf;
use thiserror::Error;

use crate::convert::ConvertError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("required settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to deserialize settings: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("missing required setting '{0}'")]
    MissingField(&'static str),

    #[error("invalid environment '{0}' (expected 'development' or 'production')")]
    InvalidEnvironment(String),

    #[error("invalid exclude_prefix '{0}' (expected a non-negative integer)")]
    InvalidExcludePrefix(String),

    #[error("separator must not be empty")]
    EmptySeparator,

    #[error("blueprint mode requires a blueprint file")]
    MissingBlueprint,

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
