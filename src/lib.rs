pub mod convert;
mod error;
pub mod pipeline;
pub mod settings;
pub mod store;

pub use convert::{
    strip_prefix, Blueprint, BlueprintConverter, BlueprintError, ConfigEntry, ConvertError,
    Converter, FlatConverter, HierarchicalConverter, KeyPath, Mode, Output,
};
pub use error::Error;
pub use pipeline::{Configurator, ConfiguratorBuilder};
pub use settings::{Environment, Settings, SettingsError};
pub use store::{FileStore, MemoryStore, ParameterStore, StoreError};
