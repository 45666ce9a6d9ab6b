//! Settings for a fetch-and-convert run.

mod builder;
mod env;
mod environment;
mod error;

use std::path::PathBuf;

pub use builder::{SettingsBuilder, DEFAULT_EXCLUDE_PREFIX};
pub use environment::Environment;
pub use error::SettingsError;

use crate::convert::Mode;

/// Field names accepted by every settings layer.
pub(crate) const FIELDS: &[&str] = &[
    "app",
    "environment",
    "additional",
    "mode",
    "separator",
    "exclude_prefix",
    "blueprint",
];

/// Validated settings. Build them with [`Settings::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// App whose config group is fetched last and wins on duplicate keys.
    pub app: String,
    pub environment: Environment,
    /// Extra config groups fetched before the app, in order.
    pub additional: Vec<String>,
    pub mode: Mode,
    /// Key separator for hierarchical mode.
    pub separator: String,
    /// Leading key segments removed before conversion.
    pub exclude_prefix: usize,
    /// Blueprint document for blueprint mode.
    pub blueprint: Option<PathBuf>,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Config groups in fetch order: additional groups, then the app.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.additional
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.app.as_str()))
    }

    /// Store path a config group is fetched from, e.g. `/Dev/billing`.
    pub fn group_path(&self, group: &str) -> String {
        format!("/{}/{}", self.environment.scope(), group)
    }
}
