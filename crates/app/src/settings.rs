//! Handles settings for the application. Configuration is read from
//! `settings.toml` in the working directory, or from the file named by the
//! `QUOTA_CONFIG` environment variable.

use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Where calculations are stored.
///
/// `database = "memory"` keeps everything in-process; `database = { sqlite =
/// "./quota.db" }` persists to a file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the workspace crates (e.g. "info", "debug").
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    /// Defaults to 127.0.0.1 when absent.
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("QUOTA_CONFIG").unwrap_or_else(|_| "settings".to_string());
        let settings = Config::builder()
            .add_source(File::with_name(&path))
            .build()?;

        settings.try_deserialize()
    }
}
