//! File-backed parameter store.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::{is_under, ParameterStore, StoreError};
use crate::convert::ConfigEntry;

/// A parameter store backed by a TOML document.
///
/// Parameters may be written as full paths or as nested tables; both of
/// these produce the key `/Dev/billing/db/host`:
///
/// ```toml
/// "/Dev/billing/db/host" = "10.0.0.1"
///
/// [Dev.billing.db]
/// host = "10.0.0.1"
/// ```
///
/// Every value must be a string. The file is re-read on each fetch.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<ConfigEntry>, StoreError> {
        let table = load_parameter_file(&self.path)?;
        let mut entries = Vec::new();
        flatten(&table, "", &mut entries)?;
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

impl ParameterStore for FileStore {
    fn fetch_all(&self, path: &str) -> Result<Vec<ConfigEntry>, StoreError> {
        let mut entries = self.load()?;
        entries.retain(|entry| is_under(&entry.key, path));
        tracing::debug!(
            file = %self.path.display(),
            path,
            count = entries.len(),
            "fetched parameters"
        );
        Ok(entries)
    }
}

fn load_parameter_file(path: &Path) -> Result<Table, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| StoreError::ParseError {
            path: path.to_path_buf(),
            source: e,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => Err(StoreError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn flatten(table: &Table, prefix: &str, out: &mut Vec<ConfigEntry>) -> Result<(), StoreError> {
    for (name, value) in table {
        let key = format!("{prefix}/{}", name.trim_start_matches('/'));
        match value {
            Value::String(s) => out.push(ConfigEntry::new(key, s.clone())),
            Value::Table(nested) => flatten(nested, &key, out)?,
            _ => return Err(StoreError::NonStringValue(key)),
        }
    }
    Ok(())
}
