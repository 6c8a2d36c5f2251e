//! Declarative channel configuration
//!
//! Lets a host describe a channel in TOML instead of calling the setters:
//!
//! ```toml
//! name = "worker"
//! level = "warn"
//! file = "~/logs/worker.log"
//! console = false
//! retention_days = 14
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::channel::{LogChannel, DEFAULT_NAME};
use crate::level::Level;
use crate::logging::DEFAULT_RETENTION_DAYS;

/// Settings for one channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Name shown in every line prefix
    #[serde(default = "default_name")]
    pub name: String,

    /// Threshold alias ("off", "fatal", "error", "warn", "info", "trace", "debug", "all")
    #[serde(default)]
    pub level: Option<String>,

    /// Base path of the daily file; `~` and environment variables are expanded
    #[serde(default)]
    pub file: Option<String>,

    /// Write to stdout (default: true)
    #[serde(default = "default_console")]
    pub console: bool,

    /// Delete dated files older than this many days (default: 7)
    #[serde(default)]
    pub retention_days: Option<u64>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_console() -> bool {
    true
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            level: None,
            file: None,
            console: default_console(),
            retention_days: None,
        }
    }
}

impl ChannelConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse channel config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    fn validate(&self) -> Result<()> {
        if let Some(alias) = &self.level {
            alias
                .parse::<Level>()
                .with_context(|| format!("Invalid level for channel '{}'", self.name))?;
        }
        Ok(())
    }

    /// Base file path with `~` and environment variables expanded
    pub fn file_path(&self) -> Result<Option<PathBuf>> {
        let Some(file) = self.file.as_deref() else {
            return Ok(None);
        };
        let expanded = shellexpand::full(file)
            .with_context(|| format!("Failed to expand log file path '{}'", file))?;
        Ok(Some(PathBuf::from(expanded.into_owned())))
    }

    /// Retention window for dated files, falling back to the default
    pub fn retention_days(&self) -> u64 {
        self.retention_days.unwrap_or(DEFAULT_RETENTION_DAYS)
    }

    /// Build a channel from these settings
    pub fn build(&self) -> Result<LogChannel> {
        let channel = LogChannel::new(self.name.clone());
        if let Some(alias) = &self.level {
            channel.set_level_alias(alias);
        }
        if let Some(path) = self.file_path()? {
            channel.set_file_name(path);
        }
        if !self.console {
            channel.stop_write_to_console();
        }
        Ok(channel)
    }
}
