//! Blueprint substitution.
//!
//! A blueprint is a JSON object shaped like the configuration an application
//! expects. Its string leaves name fetched keys:
//!
//! ```json
//! { "database": { "host": "DB_HOST", "port": "DB_PORT" }, "retries": 3 }
//! ```
//!
//! Converting replaces every string leaf with the value of the key it names.
//! Non-string leaves (`3` above) are copied through unchanged. There is no
//! escape syntax: a string leaf is always a key reference.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use super::{BlueprintError, ConfigEntry, ConvertError, Converter, Output};

/// A parsed blueprint document. The top level is always an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blueprint(Output);

impl Blueprint {
    pub fn new(template: Output) -> Self {
        Self(template)
    }

    /// Wraps a decoded JSON value, rejecting anything but an object.
    pub fn from_value(value: Value) -> Result<Self, BlueprintError> {
        match value {
            Value::Object(template) => Ok(Self(template)),
            _ => Err(BlueprintError::NotAnObject),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, BlueprintError> {
        Self::from_value(serde_json::from_str(s)?)
    }

    /// Reads and parses a blueprint file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlueprintError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlueprintError::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(BlueprintError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    pub fn template(&self) -> &Output {
        &self.0
    }
}

/// Fills a [`Blueprint`] with fetched values.
#[derive(Debug, Clone)]
pub struct BlueprintConverter {
    blueprint: Blueprint,
}

impl BlueprintConverter {
    pub fn new(blueprint: Blueprint) -> Self {
        Self { blueprint }
    }
}

impl Converter for BlueprintConverter {
    fn convert(&self, entries: Vec<ConfigEntry>) -> Result<Output, ConvertError> {
        let mut lookup = HashMap::with_capacity(entries.len());
        for ConfigEntry { key, value } in entries {
            lookup.insert(key, value);
        }

        resolve_table(self.blueprint.template(), &lookup)
    }
}

fn resolve_table(
    template: &Output,
    lookup: &HashMap<String, String>,
) -> Result<Output, ConvertError> {
    let mut resolved = Output::new();
    for (field, value) in template {
        resolved.insert(field.clone(), resolve_value(value, lookup)?);
    }
    Ok(resolved)
}

fn resolve_value(value: &Value, lookup: &HashMap<String, String>) -> Result<Value, ConvertError> {
    match value {
        Value::String(key) => lookup
            .get(key)
            .map(|found| Value::String(found.clone()))
            .ok_or_else(|| ConvertError::MissingKey { key: key.clone() }),
        Value::Object(nested) => resolve_table(nested, lookup).map(Value::Object),
        literal => Ok(literal.clone()),
    }
}
