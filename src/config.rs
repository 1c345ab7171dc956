// Service configuration: data file locations, listen address and log level
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_HOTELS_PATH: &str = "TRAVEL_SEARCH_HOTELS_PATH";
pub const ENV_FLIGHTS_PATH: &str = "TRAVEL_SEARCH_FLIGHTS_PATH";
pub const ENV_HOST: &str = "TRAVEL_SEARCH_HOST";
pub const ENV_PORT: &str = "TRAVEL_SEARCH_PORT";
pub const ENV_LOG_LEVEL: &str = "TRAVEL_SEARCH_LOG_LEVEL";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub hotels_path: PathBuf,
    pub flights_path: PathBuf,
    pub host: String,
    pub port: u16,
    // Default filter directive, used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            hotels_path: PathBuf::from("hotels.csv"),
            flights_path: PathBuf::from("flights.csv"),
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    // Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_HOTELS_PATH) {
            config.hotels_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_FLIGHTS_PATH) {
            config.flights_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_PORT,
                    value: port.clone(),
                })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        Ok(config)
    }

    // Host may be a name or an IP literal; resolution happens when binding
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
