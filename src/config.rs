use std::collections::HashMap;
use thiserror::Error;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "database.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    /// Drop and recreate every table instead of creating only missing ones.
    pub force: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = match env_map.get("DATABASE_PATH").map(|s| s.trim()) {
            None => DEFAULT_DATABASE_PATH.to_string(),
            Some("") => {
                return Err(ConfigError::InvalidValue(
                    "DATABASE_PATH".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(path) => path.to_string(),
        };

        let force = match env_map
            .get("BOOTSTRAP_FORCE")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
            .unwrap_or("false")
        {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "BOOTSTRAP_FORCE".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        Ok(Config {
            database_path,
            force,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            force: false,
        }
    }
}
