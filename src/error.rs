use crate::convert::{BlueprintError, ConvertError};
use crate::settings::SettingsError;
use crate::store::StoreError;
use thiserror::Error;

/// Top-level error type for the configurator library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("parameter store error: {0}")]
    Store(#[from] StoreError),

    #[error("blueprint error: {0}")]
    Blueprint(#[from] BlueprintError),

    #[error("conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("configurator requires settings")]
    MissingSettings,

    #[error("configurator requires a parameter store")]
    MissingStore,
}
