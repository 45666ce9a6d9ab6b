use serde_json::Value;

use super::{ConfigEntry, ConvertError, Converter, Output};

/// Exports each key verbatim as a top-level field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatConverter;

impl Converter for FlatConverter {
    fn convert(&self, entries: Vec<ConfigEntry>) -> Result<Output, ConvertError> {
        let mut output = Output::new();
        for ConfigEntry { key, value } in entries {
            if output.contains_key(&key) {
                tracing::debug!(%key, "overwriting duplicate key");
            }
            output.insert(key, Value::String(value));
        }
        Ok(output)
    }
}
