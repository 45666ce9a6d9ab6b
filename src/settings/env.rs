use toml::{Table, Value};

use super::FIELDS;

/// Copies `PREFIX<sep>FIELD` variables into `table`.
///
/// Field names are lowercased and must name a known setting; anything else
/// under the prefix is skipped with a warning. Values stay strings and are
/// interpreted when the merged table is deserialized.
pub(super) fn load_env_vars<I>(table: &mut Table, prefix: &str, separator: &str, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix_with_sep = format!("{prefix}{separator}");

    for (key, value) in vars {
        let Some(field) = key.strip_prefix(&prefix_with_sep) else {
            continue;
        };
        if field.is_empty() {
            continue;
        }

        let field = field.to_lowercase();
        if !FIELDS.contains(&field.as_str()) {
            tracing::warn!(variable = %key, "ignoring unknown settings variable");
            continue;
        }

        table.insert(field, Value::String(value));
    }
}
