//! The fetch-and-convert pipeline.

use tracing::{debug, info};

use crate::convert::{
    Blueprint, BlueprintConverter, ConfigEntry, Converter, FlatConverter, HierarchicalConverter,
    Mode, Output,
};
use crate::settings::{Settings, SettingsError};
use crate::store::ParameterStore;
use crate::Error;

/// Fetches every configured group from a store and converts the result.
///
/// ## Example
///
/// ```
/// use configurator::{Configurator, MemoryStore, Settings};
///
/// let store = MemoryStore::new()
///     .with_parameter("/Dev/shared/region", "eu-west-1")
///     .with_parameter("/Dev/billing/region", "us-east-1")
///     .with_parameter("/Dev/billing/db/host", "10.0.0.1");
///
/// let settings = Settings::builder()
///     .set("app", "billing")
///     .set("environment", "development")
///     .set("additional", "shared")
///     .set("exclude_prefix", 2)
///     .build()?;
///
/// let output = Configurator::builder()
///     .with_settings(settings)
///     .with_store(store)
///     .build()?
///     .run()?;
///
/// assert_eq!(output["region"], "us-east-1");
/// assert_eq!(output["db/host"], "10.0.0.1");
/// # Ok::<(), configurator::Error>(())
/// ```
#[derive(Debug)]
pub struct Configurator<S> {
    settings: Settings,
    store: S,
}

impl Configurator<()> {
    /// Creates a new builder for constructing a `Configurator`.
    pub fn builder() -> ConfiguratorBuilder<()> {
        ConfiguratorBuilder {
            settings: None,
            store: None,
        }
    }
}

impl<S> Configurator<S> {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ParameterStore> Configurator<S> {
    /// Builds the converter selected by the settings' mode.
    ///
    /// In blueprint mode the blueprint file is read and parsed here.
    pub fn converter(&self) -> Result<Box<dyn Converter>, Error> {
        let converter: Box<dyn Converter> = match self.settings.mode {
            Mode::Flat => Box::new(FlatConverter),
            Mode::Hierarchical => Box::new(HierarchicalConverter::new(self.settings.separator.as_str())),
            Mode::Blueprint => {
                let path = self
                    .settings
                    .blueprint
                    .as_ref()
                    .ok_or(SettingsError::MissingBlueprint)?;
                debug!(path = %path.display(), "loading blueprint");
                Box::new(BlueprintConverter::new(Blueprint::load(path)?))
            }
        };
        Ok(converter)
    }

    /// Fetches every group in order and strips the configured prefix.
    pub fn fetch(&self) -> Result<Vec<ConfigEntry>, Error> {
        let mut entries = Vec::new();

        for group in self.settings.groups() {
            let path = self.settings.group_path(group);
            let mut fetched = self.store.fetch_all(&path)?;
            debug!(%path, count = fetched.len(), "fetched config group");

            for entry in &mut fetched {
                entry.strip_prefix(self.settings.exclude_prefix)?;
            }
            entries.append(&mut fetched);
        }

        Ok(entries)
    }

    /// Runs the pipeline. Any failure aborts with no partial output.
    pub fn run(&self) -> Result<Output, Error> {
        let converter = self.converter()?;
        let entries = self.fetch()?;
        let count = entries.len();

        let output = converter.convert(entries)?;
        info!(
            mode = %self.settings.mode,
            entries = count,
            fields = output.len(),
            "converted configuration"
        );
        Ok(output)
    }
}

/// Builder for constructing a [`Configurator`].
///
/// Starts without a store (`ConfiguratorBuilder<()>`) and becomes
/// `ConfiguratorBuilder<S>` once [`with_store`](Self::with_store) is called.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfiguratorBuilder<S> {
    settings: Option<Settings>,
    store: Option<S>,
}

impl<S> ConfiguratorBuilder<S> {
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Attaches the parameter store entries are fetched from.
    pub fn with_store<T: ParameterStore>(self, store: T) -> ConfiguratorBuilder<T> {
        ConfiguratorBuilder {
            settings: self.settings,
            store: Some(store),
        }
    }

    /// Builds the `Configurator`.
    ///
    /// Returns an error if the settings or the store are missing.
    pub fn build(self) -> Result<Configurator<S>, Error> {
        Ok(Configurator {
            settings: self.settings.ok_or(Error::MissingSettings)?,
            store: self.store.ok_or(Error::MissingStore)?,
        })
    }
}
