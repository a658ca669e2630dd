//! Client configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tool configuration, loaded from a TOML file or built from defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Path to the usb.ids name database
    pub usbids_path: PathBuf,
    /// TCP port the remote export daemon listens on
    pub port: u16,
    /// Connect timeout in seconds (0 disables the deadline)
    pub connect_timeout_secs: u64,
    /// Per-read deadline in seconds (0 disables; a stalled peer then
    /// blocks the query indefinitely)
    pub read_timeout_secs: u64,
    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            usbids_path: PathBuf::from("/usr/share/hwdata/usb.ids"),
            port: 3240,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("usbls").join("config.toml")
        } else {
            PathBuf::from("/etc/usbls/config.toml")
        }
    }

    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the default configuration file, falling back to built-in
    /// defaults when it does not exist. A present-but-broken file is an
    /// error, not a silent fallback.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }
}
