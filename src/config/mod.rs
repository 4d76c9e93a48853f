//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
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

/// Directions provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Directions endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Traffic model for driving estimates
    #[serde(default = "default_traffic_model")]
    pub traffic_model: String,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_MAPS_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_traffic_model() -> String {
    "best_guess".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
            traffic_model: default_traffic_model(),
        }
    }
}

/// Fuel cost defaults used when a request does not specify them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelConfig {
    #[serde(default = "default_price")]
    pub price_per_liter: f64,

    #[serde(default = "default_efficiency")]
    pub efficiency_km_per_liter: f64,

    /// Symbol shown in front of costs
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_price() -> f64 {
    100.0
}

fn default_efficiency() -> f64 {
    15.0
}

fn default_currency() -> String {
    "₹".to_string()
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            price_per_liter: default_price(),
            efficiency_km_per_liter: default_efficiency(),
            currency: default_currency(),
        }
    }
}

/// Trend sampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_horizon")]
    pub horizon_hours: u32,
}

fn default_horizon() -> u32 {
    crate::trend::DEFAULT_HORIZON_HOURS
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            horizon_hours: default_horizon(),
        }
    }
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

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub fuel: FuelConfig,

    #[serde(default)]
    pub trend: TrendConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            provider: ProviderConfig::default(),
            fuel: FuelConfig::default(),
            trend: TrendConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Longest trend horizon accepted.
pub const MAX_HORIZON_HOURS: u32 = 24;

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Provider timeout must be greater than 0".to_string(),
            ));
        }

        if !(self.fuel.efficiency_km_per_liter > 0.0) {
            return Err(ConfigError::ValidationError(
                "Fuel efficiency must be greater than 0".to_string(),
            ));
        }

        if !(self.fuel.price_per_liter >= 0.0) {
            return Err(ConfigError::ValidationError(
                "Fuel price must not be negative".to_string(),
            ));
        }

        if self.trend.horizon_hours == 0 || self.trend.horizon_hours > MAX_HORIZON_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "Trend horizon must be between 1 and {} hours",
                MAX_HORIZON_HOURS
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
