//! TOML-based configuration for the remote-control client.
//!
//! Reads and writes [`AppConfig`] from an explicit path or from the
//! platform-appropriate config file:
//! - Windows:  `%APPDATA%\SamsungTv\config.toml`
//! - Linux:    `~/.config/samsung-tv/config.toml`
//! - macOS:    `~/Library/Application Support/SamsungTv/config.toml`
//!
//! Example file:
//!
//! ```toml
//! log_level = "info"
//!
//! [tv]
//! host = "192.168.0.21"
//! application_id = "samsung-tv-rs"
//! application_name = "Samsung TV Remote         "
//!
//! [network]
//! port = 55000
//! connect_timeout_ms = 5000
//! response_timeout_ms = 5000
//!
//! [monitor]
//! interval_secs = 5
//! ```
//!
//! # Serde default values
//!
//! Every section and field carries a `#[serde(default)]`, so an empty file,
//! a file written by an older version, and no file at all all load cleanly.
//! The one setting without a useful default is `tv.host`; it is checked when
//! the configuration is turned into a [`DeviceIdentity`].

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use samsung_tv_core::{DeviceIdentity, IdentityError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::send_command::CommandConfig;
use crate::infrastructure::network::SAMSUNG_REMOTE_PORT;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `[tv]` section does not describe a usable television.
    #[error("invalid [tv] settings: {0}")]
    InvalidIdentity(#[from] IdentityError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub tv: TvConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// The television and the identity this client presents to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TvConfig {
    /// IP address or hostname of the television.
    #[serde(default)]
    pub host: String,
    /// Identifier the TV remembers when the user allows access.
    #[serde(default = "default_application_id")]
    pub application_id: String,
    /// Name shown in the TV's "allow this device?" prompt.
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

/// Port and timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Remote-control TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Write and reply timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub response_timeout_ms: u64,
}

/// Power-monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Probe timeout, and pause after the TV answered, in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_application_id() -> String {
    "samsung-tv-rs".to_string()
}
/// Trailing spaces keep the name apart from the text some TVs print right
/// after it in the pairing prompt.
fn default_application_name() -> String {
    "Samsung TV Remote         ".to_string()
}
fn default_port() -> u16 {
    SAMSUNG_REMOTE_PORT
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_interval_secs() -> u64 {
    5
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tv: TvConfig::default(),
            network: NetworkConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl Default for TvConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            application_id: default_application_id(),
            application_name: default_application_name(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            connect_timeout_ms: default_timeout_ms(),
            response_timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Builds the validated identity from the `[tv]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidIdentity`] if the host or application
    /// name is empty.
    pub fn device_identity(&self) -> Result<DeviceIdentity, ConfigError> {
        Ok(DeviceIdentity::new(
            self.tv.host.as_str(),
            self.tv.application_id.as_str(),
            self.tv.application_name.as_str(),
        )?)
    }

    /// Connection settings for the command client.
    pub fn command_config(&self) -> CommandConfig {
        CommandConfig {
            port: self.network.port,
            connect_timeout: Duration::from_millis(self.network.connect_timeout_ms),
            response_timeout: Duration::from_millis(self.network.response_timeout_ms),
        }
    }

    /// Power-monitor polling interval.  Zero is raised to one second so the
    /// probe always has time to connect.
    pub fn monitor_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs.max(1))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the default location, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("SamsungTv"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("samsung-tv"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("SamsungTv")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
