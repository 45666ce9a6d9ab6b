//! Hierarchical key paths and prefix stripping.

use std::fmt;

use super::ConvertError;

/// Separator used by the parameter store for full keys.
pub const STORE_SEPARATOR: char = '/';

/// A separator-delimited key split into its segments.
///
/// Segments are never empty, so joining them with the separator reproduces
/// the original key exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// Parses `key` by splitting on `separator`.
    ///
    /// Fails with [`ConvertError::InvalidKey`] for an empty key or for any
    /// empty segment (leading, trailing or doubled separators).
    pub fn parse(key: &str, separator: &str) -> Result<Self, ConvertError> {
        assert!(!separator.is_empty(), "separator must not be empty");

        if key.is_empty() {
            return Err(ConvertError::invalid_key(key, "key is empty"));
        }

        let segments: Vec<String> = key.split(separator).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ConvertError::invalid_key(
                key,
                format!("empty segment when split on '{separator}'"),
            ));
        }

        Ok(Self {
            raw: key.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Splits the path into its parent segments and the leaf segment.
    pub fn split_leaf(&self) -> (&[String], &str) {
        let (leaf, parents) = self
            .segments
            .split_last()
            .expect("parsed key paths have at least one segment");
        (parents, leaf)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Removes `prefix_length` leading segments from a full store key.
///
/// Store keys always start with `/`, so splitting yields an empty first
/// segment; that segment is dropped along with the requested prefix.
/// `strip_prefix("/Dev/app/db/host", 1)` returns `"app/db/host"`.
///
/// Fails when the key has fewer than `prefix_length + 2` segments. Two
/// stricter checks also apply: the key must start with `/`, and a strip
/// that leaves an empty key (`"/Dev/"` with a prefix of 1) is rejected even
/// though enough segments are present.
pub fn strip_prefix(key: &str, prefix_length: usize) -> Result<String, ConvertError> {
    if !key.starts_with(STORE_SEPARATOR) {
        return Err(ConvertError::invalid_key(key, "key must start with '/'"));
    }

    let segments: Vec<&str> = key.split(STORE_SEPARATOR).collect();
    if segments.len() - 1 <= prefix_length {
        return Err(ConvertError::invalid_key(
            key,
            format!(
                "cannot strip {prefix_length} prefix segment(s) from a key with {} segment(s)",
                segments.len() - 1
            ),
        ));
    }

    let stripped = segments[prefix_length + 1..].join("/");
    if stripped.is_empty() {
        return Err(ConvertError::invalid_key(key, "nothing left after stripping prefix"));
    }

    Ok(stripped)
}
