//! Parameter stores supplying raw entries to the pipeline.

mod error;
mod file;

pub use error::StoreError;
pub use file::FileStore;

use crate::convert::ConfigEntry;

/// A hierarchical key/value store.
///
/// `fetch_all` behaves like a recursive get-by-path: it returns every
/// parameter whose key is `path` itself or lies anywhere beneath `path/`,
/// with full keys.
pub trait ParameterStore: Send + Sync + std::fmt::Debug {
    fn fetch_all(&self, path: &str) -> Result<Vec<ConfigEntry>, StoreError>;
}

impl<S: ParameterStore + ?Sized> ParameterStore for Box<S> {
    fn fetch_all(&self, path: &str) -> Result<Vec<ConfigEntry>, StoreError> {
        (**self).fetch_all(path)
    }
}

/// An in-memory store returning parameters in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<ConfigEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(ConfigEntry::new(key, value));
    }
}

impl<E: Into<ConfigEntry>> FromIterator<E> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ParameterStore for MemoryStore {
    fn fetch_all(&self, path: &str) -> Result<Vec<ConfigEntry>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| is_under(&entry.key, path))
            .cloned()
            .collect())
    }
}

/// Whether `key` equals `path` or lies beneath it.
pub(crate) fn is_under(key: &str, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    match key.strip_prefix(path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
