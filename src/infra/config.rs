use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::sound::EMBEDDED_MARKER;

pub const CONFIG_PATH_VAR: &str = "DESKTOP_ALERT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid MODE: {0}. Must be 'stdio' or 'http'")]
    InvalidMode(String),
    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
    #[error("Invalid HOST: {0}")]
    InvalidHost(String),
    #[error("PORT cannot be 0")]
    ZeroPort,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Stdio,
    Http,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Mode::Stdio),
            "http" | "server" => Ok(Mode::Http),
            _ => Err(ConfigError::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Stdio => f.write_str("stdio"),
            Mode::Http => f.write_str("http"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub app_name: String,
    pub timeout_ms: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { app_name: "desktop-alert".into(), timeout_ms: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub enabled: bool,
    /// Specifier played after every alert sent through the MCP tool.
    pub alert_sound: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self { enabled: true, alert_sound: EMBEDDED_MARKER.into() }
    }
}

impl SoundConfig {
    /// Specifier to play, or empty when sound is disabled.
    pub fn effective_alert_sound(&self) -> &str {
        if self.enabled {
            &self.alert_sound
        } else {
            ""
        }
    }
}

/// Shape of the optional TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    notification: NotificationConfig,
    sound: SoundConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub host: IpAddr,
    pub port: u16,
    pub notification: NotificationConfig,
    pub sound: SoundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Stdio,
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            notification: NotificationConfig::default(),
            sound: SoundConfig::default(),
        }
    }
}

impl Config {
    /// Lenient load: anything invalid falls back to defaults with a warning.
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Strict load from `MODE`, `HOST`, `PORT` and the optional TOML file
    /// named by `DESKTOP_ALERT_CONFIG`.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(path) = non_empty_var(CONFIG_PATH_VAR) {
            let file = load_file(Path::new(&path))?;
            cfg.notification = file.notification;
            cfg.sound = file.sound;
        }
        if let Some(mode) = non_empty_var("MODE") {
            cfg.mode = mode.parse()?;
        }
        if let Some(host) = non_empty_var("HOST") {
            cfg.host = host.parse().map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Some(port) = non_empty_var("PORT") {
            cfg.port = port.parse::<u16>().map_err(|_| ConfigError::InvalidPort(port))?;
            if cfg.port == 0 {
                return Err(ConfigError::ZeroPort);
            }
        }
        Ok(cfg)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
}
