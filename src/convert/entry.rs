use super::key::strip_prefix;
use super::ConvertError;

/// A single fetched (key, value) configuration pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Strips `prefix_length` leading segments from the key in place.
    pub fn strip_prefix(&mut self, prefix_length: usize) -> Result<(), ConvertError> {
        self.key = strip_prefix(&self.key, prefix_length)?;
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for ConfigEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix_in_place() {
        let mut entry = ConfigEntry::new("/Dev/billing/db/host", "10.0.0.1");
        entry.strip_prefix(2).unwrap();
        assert_eq!(entry.key, "db/host");
        assert_eq!(entry.value, "10.0.0.1");
    }

    #[test]
    fn test_strip_prefix_failure_leaves_key() {
        let mut entry = ConfigEntry::new("/Dev", "x");
        assert!(entry.strip_prefix(1).is_err());
        assert_eq!(entry.key, "/Dev");
    }
}
