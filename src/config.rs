use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_OUTPUT_FILENAME: &str = "playlist.m3u";
pub const DEFAULT_GO2RTC_BASE_URL: &str = "http://localhost:1984";
pub const DEFAULT_GO2RTC_GROUP: &str = "go2rtc";

/// Top-level configuration file. Every section may be left out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub init7: Init7Config,
    pub go2rtc: Go2rtcConfig,
    pub output: OutputConfig,
}

/// Remote channel list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Init7Config {
    pub enabled: bool,
    pub url: Option<String>,
}

/// Locally relayed streams
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Go2rtcConfig {
    pub enabled: bool,
    /// Relative stream URLs are resolved against this
    pub base_url: String,
    pub streams: Vec<StreamConfig>,
}

impl Default for Go2rtcConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_GO2RTC_BASE_URL.to_string(),
            streams: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub name: String,
    pub url: String,
    pub logo: String,
    pub group: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            name: crate::playlist::entry::UNKNOWN_NAME.to_string(),
            url: String::new(),
            logo: String::new(),
            group: DEFAULT_GO2RTC_GROUP.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub filename: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
        }
    }
}

impl Config {
    /// Reads and parses a YAML configuration file
    ///
    /// # Errors
    /// Errors when the file can't be read or isn't valid configuration YAML
    #[instrument]
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Reading configuration file {}", path.display()))?;

        let config = Self::from_yaml(&raw)
            .with_context(|| format!("Parsing configuration file {}", path.display()))?;
        debug!("Loaded configuration: {config:?}");

        Ok(config)
    }

    /// # Errors
    /// Errors on malformed YAML or mistyped values
    pub fn from_yaml(raw: &str) -> Result<Self> {
        // An empty document deserializes to `()`, treat it as all defaults
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}
