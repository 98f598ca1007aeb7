//! Run configuration: JSON file with defaults, then environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_SERVER: &str = "http://localhost:8096/emby";
pub const DEFAULT_PAUSE_MS: u64 = 25;
pub const DEFAULT_MAX_PASSES: u32 = 15;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONFIG_FILE: &str = "chanorder.json";

/// Settings for one chanorder run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanOrderConfig {
    /// Base URL, e.g. `http://host:8096/emby`.
    #[serde(default = "default_server")]
    pub server: String,
    /// Admin API key, sent as `X-Emby-Token`.
    #[serde(default)]
    pub api_key: String,
    /// Delay after each issued write.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    /// Retry ceiling for whole passes.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server() -> String {
    DEFAULT_SERVER.into()
}
fn default_pause_ms() -> u64 {
    DEFAULT_PAUSE_MS
}
fn default_max_passes() -> u32 {
    DEFAULT_MAX_PASSES
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ChanOrderConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.into(),
            api_key: String::new(),
            pause_ms: DEFAULT_PAUSE_MS,
            max_passes: DEFAULT_MAX_PASSES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ChanOrderConfig {
    /// Load from `CHANORDER_CONFIG` (or `chanorder.json`), apply env
    /// overrides and validate.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("CHANORDER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::load(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Override fields from `CHANORDER_*` variables resolved by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup("CHANORDER_SERVER") {
            self.server = server;
        }
        if let Some(key) = lookup("CHANORDER_API_KEY") {
            self.api_key = key;
        }
        if let Some(v) = lookup("CHANORDER_PAUSE_MS") {
            self.pause_ms = parse_var("CHANORDER_PAUSE_MS", &v)?;
        }
        if let Some(v) = lookup("CHANORDER_MAX_PASSES") {
            self.max_passes = parse_var("CHANORDER_MAX_PASSES", &v)?;
        }
        if let Some(v) = lookup("CHANORDER_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("CHANORDER_TIMEOUT_SECS", &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::Config("server URL is empty".into()));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::Config(
                "API key is missing (set CHANORDER_API_KEY or api_key in the config file)".into(),
            ));
        }
        if self.max_passes == 0 {
            return Err(Error::Config("max_passes must be at least 1".into()));
        }
        Ok(())
    }

    /// Server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server.trim_end_matches('/')
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value {:?}", name, value)))
}
