//! The conversion engine: turns fetched entries into structured output.
//!
//! Three strategies are available, selected by [`Mode`]:
//!
//! - [`FlatConverter`] keeps every key verbatim as a top-level field.
//! - [`HierarchicalConverter`] splits keys on a separator and nests them.
//! - [`BlueprintConverter`] fills a template whose leaves name the keys to use.
//!
//! Duplicate keys are resolved last-write-wins in input order.

mod blueprint;
mod entry;
mod error;
mod flat;
mod hierarchical;
mod key;

use std::fmt;
use std::str::FromStr;

pub use blueprint::{Blueprint, BlueprintConverter};
pub use entry::ConfigEntry;
pub use error::{BlueprintError, ConvertError};
pub use flat::FlatConverter;
pub use hierarchical::HierarchicalConverter;
pub use key::{strip_prefix, KeyPath, STORE_SEPARATOR};

/// Structured conversion output: a JSON object with string keys.
pub type Output = serde_json::Map<String, serde_json::Value>;

/// A strategy turning an ordered sequence of entries into one mapping.
///
/// Implementations hold only their configuration; each call is independent.
pub trait Converter: Send + Sync + fmt::Debug {
    fn convert(&self, entries: Vec<ConfigEntry>) -> Result<Output, ConvertError>;
}

/// Name of a conversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys are exported as-is in a flat structure.
    #[default]
    Flat,
    /// Keys are broken down by separator into nested objects.
    Hierarchical,
    /// A blueprint's leaves are replaced by the values they name.
    Blueprint,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Flat => "flat",
            Mode::Hierarchical => "hierarchical",
            Mode::Blueprint => "blueprint",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Mode::Flat),
            "hierarchical" => Ok(Mode::Hierarchical),
            "blueprint" => Ok(Mode::Blueprint),
            other => Err(ConvertError::UnsupportedMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("flat".parse::<Mode>().unwrap(), Mode::Flat);
        assert_eq!("hierarchical".parse::<Mode>().unwrap(), Mode::Hierarchical);
        assert_eq!("blueprint".parse::<Mode>().unwrap(), Mode::Blueprint);
    }

    #[test]
    fn test_mode_unsupported() {
        let err = "nested".parse::<Mode>().unwrap_err();
        assert_eq!(err, ConvertError::UnsupportedMode("nested".into()));
        assert_eq!(err.to_string(), "unsupported convert mode 'nested'");
    }

    #[test]
    fn test_mode_display_roundtrip() {
        for mode in [Mode::Flat, Mode::Hierarchical, Mode::Blueprint] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_converters_are_object_safe() {
        let converters: Vec<Box<dyn Converter>> = vec![
            Box::new(FlatConverter),
            Box::new(HierarchicalConverter::default()),
            Box::new(BlueprintConverter::new(Blueprint::default())),
        ];
        for converter in converters {
            assert!(converter.convert(Vec::new()).unwrap().is_empty());
        }
    }
}
