use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::{Table, Value};

use super::env::load_env_vars;
use super::{Environment, Settings, SettingsError};
use crate::convert::{Mode, STORE_SEPARATOR};

/// Prefix segments removed from fetched keys unless configured otherwise.
pub const DEFAULT_EXCLUDE_PREFIX: usize = 1;

/// A layer in the settings pipeline.
#[derive(Debug)]
enum SettingsSource {
    File { path: PathBuf, required: bool },
    Env { prefix: String, separator: String },
    Overrides(Table),
}

/// Builder for loading [`Settings`] from layered sources.
///
/// Layers are applied in registration order; a field set by a later layer
/// replaces the same field from an earlier one. Fields no layer sets take
/// their defaults (`mode = "flat"`, `separator = "/"`, `exclude_prefix = 1`).
///
/// ## Example
///
/// ```no_run
/// use configurator::Settings;
///
/// // file defaults -> CONFIGURATOR__* variables -> explicit values
/// let settings = Settings::builder()
///     .with_file("configurator.toml", false)
///     .with_env("CONFIGURATOR", "__")
///     .set("app", "billing")
///     .set("environment", "development")
///     .build()?;
///
/// assert_eq!(settings.group_path("billing"), "/Dev/billing");
/// # Ok::<(), configurator::SettingsError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsBuilder {
    sources: Vec<SettingsSource>,
}

impl SettingsBuilder {
    /// Adds a TOML settings file.
    ///
    /// If `required` is `true`, the build fails when the file doesn't exist.
    /// Optional files that are missing are skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(SettingsSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Reads settings from `PREFIX<separator>FIELD` environment variables,
    /// e.g. `CONFIGURATOR__EXCLUDE_PREFIX=2`.
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        self.sources.push(SettingsSource::Env {
            prefix: prefix.into(),
            separator,
        });
        self
    }

    /// Adds a table of explicit values as a layer.
    pub fn with_overrides(mut self, overrides: Table) -> Self {
        self.sources.push(SettingsSource::Overrides(overrides));
        self
    }

    /// Sets a single field in the topmost explicit layer.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        match self.sources.last_mut() {
            Some(SettingsSource::Overrides(table)) => {
                table.insert(field.to_string(), value.into());
            }
            _ => {
                let mut table = Table::new();
                table.insert(field.to_string(), value.into());
                self.sources.push(SettingsSource::Overrides(table));
            }
        }
        self
    }

    /// Merges every layer, then deserializes and validates the result.
    pub fn build(self) -> Result<Settings, SettingsError> {
        let mut merged = Table::new();

        for source in self.sources {
            match source {
                SettingsSource::File { path, required } => {
                    if let Some(table) = load_settings_file(&path, required)? {
                        merged.extend(table);
                    }
                }
                SettingsSource::Env { prefix, separator } => {
                    load_env_vars(&mut merged, &prefix, &separator, std::env::vars());
                }
                SettingsSource::Overrides(table) => merged.extend(table),
            }
        }

        let raw: RawSettings = Value::Table(merged).try_into()?;
        raw.validate()
    }
}

/// Loads and parses a TOML settings file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_settings_file(path: &Path, required: bool) -> Result<Option<Table>, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| SettingsError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(SettingsError::FileNotFound(path.to_path_buf()))
            } else {
                tracing::debug!(path = %path.display(), "optional settings file not found");
                Ok(None)
            }
        }
        Err(e) => Err(SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Settings as written, before defaults and validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    app: Option<String>,
    environment: Option<String>,
    additional: Option<StringOrList>,
    mode: Option<String>,
    separator: Option<String>,
    exclude_prefix: Option<IntOrString>,
    blueprint: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl RawSettings {
    fn validate(self) -> Result<Settings, SettingsError> {
        let app = self
            .app
            .map(|app| app.trim().to_string())
            .filter(|app| !app.is_empty())
            .ok_or(SettingsError::MissingField("app"))?;

        let environment: Environment = self
            .environment
            .ok_or(SettingsError::MissingField("environment"))?
            .parse()?;

        let mode = match self.mode {
            Some(mode) => mode.parse::<Mode>()?,
            None => Mode::default(),
        };

        let separator = self.separator.unwrap_or_else(|| STORE_SEPARATOR.to_string());
        if separator.is_empty() {
            return Err(SettingsError::EmptySeparator);
        }

        let exclude_prefix = match self.exclude_prefix {
            None => DEFAULT_EXCLUDE_PREFIX,
            Some(IntOrString::Int(n)) => {
                usize::try_from(n).map_err(|_| SettingsError::InvalidExcludePrefix(n.to_string()))?
            }
            Some(IntOrString::Str(s)) => s
                .trim()
                .parse::<usize>()
                .map_err(|_| SettingsError::InvalidExcludePrefix(s.clone()))?,
        };

        if mode == Mode::Blueprint && self.blueprint.is_none() {
            return Err(SettingsError::MissingBlueprint);
        }

        let additional = match self.additional {
            None => Vec::new(),
            Some(StringOrList::One(list)) => split_groups(list.split(',')),
            Some(StringOrList::Many(list)) => split_groups(list.iter().map(String::as_str)),
        };

        Ok(Settings {
            app,
            environment,
            additional,
            mode,
            separator,
            exclude_prefix,
            blueprint: self.blueprint,
        })
    }
}

fn split_groups<'a>(groups: impl Iterator<Item = &'a str>) -> Vec<String> {
    groups
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base() -> SettingsBuilder {
        Settings::builder()
            .set("app", "billing")
            .set("environment", "development")
    }

    #[test]
    fn test_defaults() {
        let settings = base().build().unwrap();

        assert_eq!(settings.app, "billing");
        assert_eq!(settings.environment, Environment::Development);
        assert!(settings.additional.is_empty());
        assert_eq!(settings.mode, Mode::Flat);
        assert_eq!(settings.separator, "/");
        assert_eq!(settings.exclude_prefix, DEFAULT_EXCLUDE_PREFIX);
        assert_eq!(settings.blueprint, None);
    }

    #[test]
    fn test_missing_required_fields() {
        let result = Settings::builder().set("environment", "production").build();
        assert!(matches!(result, Err(SettingsError::MissingField("app"))));

        let result = Settings::builder().set("app", "billing").build();
        assert!(matches!(result, Err(SettingsError::MissingField("environment"))));

        let result = base().set("app", "  ").build();
        assert!(matches!(result, Err(SettingsError::MissingField("app"))));
    }

    #[test]
    fn test_unsupported_mode() {
        let result = base().set("mode", "yaml").build();
        assert!(matches!(
            result,
            Err(SettingsError::Convert(ConvertError::UnsupportedMode(ref mode))) if mode == "yaml"
        ));
    }

    #[test]
    fn test_blueprint_mode_requires_file() {
        let result = base().set("mode", "blueprint").build();
        assert!(matches!(result, Err(SettingsError::MissingBlueprint)));

        let settings = base()
            .set("mode", "blueprint")
            .set("blueprint", "blueprint.json")
            .build()
            .unwrap();
        assert_eq!(settings.blueprint, Some(PathBuf::from("blueprint.json")));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let result = base().set("separator", "").build();
        assert!(matches!(result, Err(SettingsError::EmptySeparator)));
    }

    #[test]
    fn test_exclude_prefix_forms() {
        assert_eq!(base().set("exclude_prefix", 3).build().unwrap().exclude_prefix, 3);
        assert_eq!(base().set("exclude_prefix", "0").build().unwrap().exclude_prefix, 0);
        assert!(matches!(
            base().set("exclude_prefix", -1).build(),
            Err(SettingsError::InvalidExcludePrefix(_))
        ));
        assert!(matches!(
            base().set("exclude_prefix", "two").build(),
            Err(SettingsError::InvalidExcludePrefix(_))
        ));
    }

    #[test]
    fn test_additional_forms() {
        let settings = base().set("additional", "shared, common,,").build().unwrap();
        assert_eq!(settings.additional, ["shared", "common"]);

        let list = Value::Array(vec!["shared".into(), "common".into()]);
        let settings = base().set("additional", list).build().unwrap();
        assert_eq!(settings.additional, ["shared", "common"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = base().set("colour", "blue").build();
        assert!(matches!(result, Err(SettingsError::DeserializeError(_))));
    }

    #[test]
    fn test_file_then_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            app = "from-file"
            environment = "production"
            mode = "hierarchical"
            exclude_prefix = 2
            "#
        )
        .unwrap();

        let settings = Settings::builder()
            .with_file(file.path(), true)
            .set("app", "billing")
            .build()
            .unwrap();

        assert_eq!(settings.app, "billing");
        assert_eq!(settings.environment, Environment::Production);
        assert_eq!(settings.mode, Mode::Hierarchical);
        assert_eq!(settings.exclude_prefix, 2);
    }

    #[test]
    fn test_required_file_missing() {
        let result = base().with_file("/nonexistent/configurator.toml", true).build();
        assert!(matches!(result, Err(SettingsError::FileNotFound(_))));
    }

    #[test]
    fn test_optional_file_missing() {
        let settings = base()
            .with_file("/nonexistent/configurator.toml", false)
            .build()
            .unwrap();
        assert_eq!(settings.app, "billing");
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "app = ").unwrap();

        let result = base().with_file(file.path(), true).build();
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }
}
