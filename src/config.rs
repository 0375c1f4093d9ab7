//! Configuration management with TOML and environment variable overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STEAM_SALE_CONFIG";

/// Application configuration with layered loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storefront listing page URL
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Seconds to sleep between polls in loop mode
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// File written by `--dump`
    #[serde(default = "default_dump_path")]
    pub dump_path: PathBuf,
}

fn default_store_url() -> String {
    "http://store.steampowered.com".to_string()
}

fn default_poll_interval_secs() -> u64 {
    300
}

fn default_dump_path() -> PathBuf {
    PathBuf::from("store_content.html")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            poll_interval_secs: default_poll_interval_secs(),
            dump_path: default_dump_path(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("steam-sale").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Loads configuration from `$STEAM_SALE_CONFIG` or the default locations.
    pub fn load_from_env() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load(explicit.as_deref())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("STEAM_SALE_URL") {
            self.store_url = url;
        }

        if let Ok(interval) = std::env::var("STEAM_SALE_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.poll_interval_secs = secs;
            }
        }

        self
    }
}
