//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Ranking engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Matches considered for the recent-form trend string.
    #[serde(default = "default_trend_length")]
    pub trend_length: usize,

    /// Divisor applied to opponent points for adjusted scoring.
    #[serde(default = "default_strength_divisor")]
    pub strength_divisor: f64,
}

fn default_trend_length() -> usize {
    crate::calculate::DEFAULT_TREND_LENGTH
}

fn default_strength_divisor() -> f64 {
    crate::calculate::DEFAULT_STRENGTH_DIVISOR
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            trend_length: default_trend_length(),
            strength_divisor: default_strength_divisor(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ranking: RankingConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.ranking.trend_length == 0 {
            return Err(ConfigError::ValidationError(
                "Trend length must be greater than 0".to_string(),
            ));
        }

        if self.ranking.strength_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "Strength divisor must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
