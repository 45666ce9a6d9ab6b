use serde_json::Value;

use super::{ConfigEntry, ConvertError, Converter, KeyPath, Output, STORE_SEPARATOR};

/// Nests keys into objects by splitting them on a separator.
///
/// `db/primary/host = x` becomes `{"db": {"primary": {"host": "x"}}}`.
/// A key whose path runs through an existing scalar, or whose leaf lands on
/// an existing object, is a [`ConvertError::PathConflict`].
#[derive(Debug, Clone)]
pub struct HierarchicalConverter {
    separator: String,
}

impl HierarchicalConverter {
    pub fn new(separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self { separator }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for HierarchicalConverter {
    fn default() -> Self {
        Self::new(STORE_SEPARATOR)
    }
}

impl Converter for HierarchicalConverter {
    fn convert(&self, entries: Vec<ConfigEntry>) -> Result<Output, ConvertError> {
        let mut output = Output::new();
        for entry in entries {
            let path = KeyPath::parse(&entry.key, &self.separator)?;
            insert_at_path(&mut output, &path, entry.value)?;
        }
        Ok(output)
    }
}

fn insert_at_path(output: &mut Output, path: &KeyPath, value: String) -> Result<(), ConvertError> {
    let (parents, leaf) = path.split_leaf();

    let mut table = output;
    for segment in parents {
        let slot = table
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Output::new()));
        table = match slot {
            Value::Object(nested) => nested,
            _ => return Err(conflict(path)),
        };
    }

    match table.get(leaf) {
        Some(Value::Object(_)) => return Err(conflict(path)),
        Some(_) => tracing::debug!(key = %path, "overwriting duplicate key"),
        None => {}
    }
    table.insert(leaf.to_string(), Value::String(value));
    Ok(())
}

fn conflict(path: &KeyPath) -> ConvertError {
    ConvertError::PathConflict {
        key: path.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(pairs: &[(&str, &str)]) -> Result<Output, ConvertError> {
        let entries = pairs.iter().map(|&(k, v)| ConfigEntry::new(k, v)).collect();
        HierarchicalConverter::default().convert(entries)
    }

    #[test]
    fn test_nested_path() {
        let output = convert(&[("a/b/c", "v")]).unwrap();
        assert_eq!(output["a"]["b"]["c"], json!("v"));
    }

    #[test]
    fn test_siblings_share_parent() {
        let output = convert(&[
            ("db/host", "localhost"),
            ("db/port", "5432"),
            ("name", "billing"),
        ])
        .unwrap();
        assert_eq!(
            Value::Object(output),
            json!({
                "db": { "host": "localhost", "port": "5432" },
                "name": "billing"
            })
        );
    }

    #[test]
    fn test_scalar_then_nested_conflicts() {
        let result = convert(&[("a", "1"), ("a/b", "2")]);
        assert_eq!(
            result.unwrap_err(),
            ConvertError::PathConflict { key: "a/b".into() }
        );
    }

    #[test]
    fn test_nested_then_scalar_conflicts() {
        let result = convert(&[("a/b", "2"), ("a", "1")]);
        assert_eq!(result.unwrap_err(), ConvertError::PathConflict { key: "a".into() });
    }

    #[test]
    fn test_deep_conflict_names_offending_key() {
        let result = convert(&[("a/b", "1"), ("a/b/c/d", "2")]);
        assert_eq!(
            result.unwrap_err(),
            ConvertError::PathConflict { key: "a/b/c/d".into() }
        );
    }

    #[test]
    fn test_last_write_wins_at_leaf() {
        let output = convert(&[("a/b", "first"), ("a/b", "second")]).unwrap();
        assert_eq!(output["a"]["b"], json!("second"));
    }

    #[test]
    fn test_single_segment_is_top_level() {
        let output = convert(&[("name", "billing")]).unwrap();
        assert_eq!(Value::Object(output), json!({ "name": "billing" }));
    }

    #[test]
    fn test_empty_segment_is_invalid() {
        let result = convert(&[("a//b", "1")]);
        assert!(matches!(result, Err(ConvertError::InvalidKey { ref key, .. }) if key == "a//b"));
    }

    #[test]
    fn test_custom_separator() {
        let entries = vec![ConfigEntry::new("db.host", "localhost"), ConfigEntry::new("a/b", "x")];
        let output = HierarchicalConverter::new(".").convert(entries).unwrap();
        assert_eq!(
            Value::Object(output),
            json!({ "db": { "host": "localhost" }, "a/b": "x" })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(convert(&[]).unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "separator must not be empty")]
    fn test_empty_separator_panics() {
        HierarchicalConverter::new("");
    }
}
