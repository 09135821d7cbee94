//! Configuration management for saush
//!
//! Configuration comes from a TOML file or from `SAUSH_*` environment
//! variables, falling back to defaults for anything unset.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::freshness::{FreshnessPolicy, DEFAULT_FRESHNESS_MINUTES};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Indexing behaviour
    pub index: IndexConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,
}

/// What re-indexing a known page does with its previous locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReindexMode {
    /// Keep old locations and append the new ones
    #[default]
    Append,
    /// Delete the page's old locations before writing the new ones
    Replace,
}

impl FromStr for ReindexMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "replace" => Ok(Self::Replace),
            other => Err(Error::config(format!(
                "unknown reindex mode {other:?} (expected append or replace)"
            ))),
        }
    }
}

/// Indexing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Minutes after the last refresh during which a page is fresh
    pub freshness_minutes: i64,

    /// Re-index behaviour for pages already in the index
    pub reindex: ReindexMode,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("data/saush.db"),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            freshness_minutes: DEFAULT_FRESHNESS_MINUTES,
            reindex: ReindexMode::Append,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from `SAUSH_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("SAUSH_SQLITE_PATH") {
            self.database.sqlite_path = PathBuf::from(path);
        }

        if let Ok(raw) = std::env::var("SAUSH_FRESHNESS_MINUTES") {
            self.index.freshness_minutes = raw
                .parse()
                .map_err(|_| Error::config(format!("SAUSH_FRESHNESS_MINUTES is not an integer: {raw}")))?;
        }

        if let Ok(raw) = std::env::var("SAUSH_REINDEX") {
            self.index.reindex = raw.parse()?;
        }

        if let Ok(level) = std::env::var("SAUSH_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("SAUSH_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.index.freshness_minutes <= 0 {
            return Err(Error::config("freshness_minutes must be greater than 0"));
        }

        if self.database.sqlite_path.as_os_str().is_empty() {
            return Err(Error::config("sqlite_path must not be empty"));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config(format!(
                "log format must be text or json, got {}",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Freshness policy described by this configuration
    #[must_use]
    pub fn freshness_policy(&self) -> FreshnessPolicy {
        FreshnessPolicy::from_minutes(self.index.freshness_minutes)
    }
}
