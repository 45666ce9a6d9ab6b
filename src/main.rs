//! configurator CLI
//!
//! Fetches config values for an app from a parameter store and prints them
//! as JSON in the requested shape.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use configurator::settings::SettingsBuilder;
use configurator::{Configurator, FileStore, Settings};
use toml::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prefix for settings read from the environment, e.g. `CONFIGURATOR__MODE`.
const ENV_PREFIX: &str = "CONFIGURATOR";

/// CLI for fetching config values from a parameter store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// App for which config needs to be fetched
    #[arg(short, long)]
    app: Option<String>,

    /// Additional config groups to fetch before the app, comma separated
    #[arg(short = 't', long, value_delimiter = ',')]
    additional: Vec<String>,

    /// Environment for which config needs to be fetched: development or production
    #[arg(short, long)]
    environment: Option<String>,

    /// Convert mode: flat, hierarchical or blueprint
    #[arg(short, long)]
    mode: Option<String>,

    /// Number of leading key segments to exclude from the output (default: 1)
    #[arg(short = 'p', long, visible_alias = "excludePrefix")]
    exclude_prefix: Option<u32>,

    /// Key separator for hierarchical mode (default: /)
    #[arg(long)]
    separator: Option<String>,

    /// Blueprint JSON file whose leaves name the keys to fill in
    #[arg(short, long)]
    blueprint: Option<PathBuf>,

    /// TOML file holding the parameters
    #[arg(long, default_value = "parameters.toml")]
    parameters: PathBuf,

    /// Settings file; skipped if missing
    #[arg(short, long, default_value = "configurator.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layers the settings file, environment and flags, in that order.
    fn settings(&self) -> Result<Settings> {
        let builder = Settings::builder()
            .with_file(&self.config, false)
            .with_env(ENV_PREFIX, "__");

        self.apply_flags(builder).build().context("invalid settings")
    }

    /// Adds every flag that was given as an explicit layer on `builder`.
    fn apply_flags(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(ref app) = self.app {
            builder = builder.set("app", app.as_str());
        }
        if let Some(ref environment) = self.environment {
            builder = builder.set("environment", environment.as_str());
        }
        if !self.additional.is_empty() {
            let groups = self.additional.iter().cloned().map(Value::String).collect();
            builder = builder.set("additional", Value::Array(groups));
        }
        if let Some(ref mode) = self.mode {
            builder = builder.set("mode", mode.as_str());
        }
        if let Some(prefix) = self.exclude_prefix {
            builder = builder.set("exclude_prefix", Value::Integer(i64::from(prefix)));
        }
        if let Some(ref separator) = self.separator {
            builder = builder.set("separator", separator.as_str());
        }
        if let Some(ref blueprint) = self.blueprint {
            builder = builder.set("blueprint", blueprint.to_string_lossy().into_owned());
        }
        builder
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = cli.settings()?;
    debug!(?settings, "resolved settings");

    let output = Configurator::builder()
        .with_settings(settings)
        .with_store(FileStore::new(&cli.parameters))
        .build()?
        .run()
        .context("failed to fetch configuration")?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
