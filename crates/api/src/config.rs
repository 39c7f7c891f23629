//! Service settings
//!
//! Layered as built-in defaults, then an optional `configuration/base` file
//! (toml, yaml or json), then `WEATHER__*` environment variables, e.g.
//! `WEATHER__DATABASE__PATH=/data/hawaii.sqlite`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Top-level settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    /// Max tracing level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,
    pub metrics: MetricsSettings,
}

/// HTTP listener
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Weather database
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

/// Prometheus exporter
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen: String,
}

impl Settings {
    /// Load from `configuration/` under the current directory
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("configuration"))
    }

    /// Load using `dir` as the configuration directory
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.path", "Resources/hawaii.sqlite")?
            .set_default("database.max_connections", 4)?
            .set_default("log_level", "info")?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen", "0.0.0.0:9000")?
            .add_source(File::from(dir.join("base")).required(false))
            .add_source(
                Environment::with_prefix("WEATHER")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
