use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{read_to_string, try_exists};

use crate::light::lamp::Lamp;
use crate::mqtt::config::MqttConfig;

const CONFIG_DIR: &str = ".config/tl-mapper";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Invalid config in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Pin {pin} is assigned to more than one lamp")]
    DuplicatePin { pin: u8 },
}

/// BCM pin numbers of the three lamps
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PinConfig {
    pub red: u8,
    pub yellow: u8,
    pub green: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            red: 9,
            yellow: 10,
            green: 11,
        }
    }
}

impl PinConfig {
    pub fn pin(&self, lamp: Lamp) -> u8 {
        match lamp {
            Lamp::Red => self.red,
            Lamp::Yellow => self.yellow,
            Lamp::Green => self.green,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.red == self.yellow || self.red == self.green {
            return Err(ConfigError::DuplicatePin { pin: self.red });
        }
        if self.yellow == self.green {
            return Err(ConfigError::DuplicatePin { pin: self.yellow });
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Where a loaded config came from
///
/// Config is loaded before the subscriber exists, so the caller logs this
/// once logging is up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigSource::Defaults { missing } => {
                write!(f, "No config at {}, using defaults", missing.display())
            }
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub mqtt: MqttConfig,
    pub pins: PinConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.pins.validate()?;
        Ok(config)
    }

    /// Loads `path`, or the defaults if the file does not exist
    pub async fn load_from(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let exists = try_exists(path)
            .await
            .map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !exists {
            let source = ConfigSource::Defaults {
                missing: path.to_path_buf(),
            };
            return Ok((Self::default(), source));
        }

        let text = read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let config = Self::parse(path, &text)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub async fn load() -> Result<(Self, ConfigSource), ConfigError> {
        Self::load_from(&default_path()).await
    }
}

pub fn default_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}
