use crate::shared::errors::{AppError, AppResult};
use std::path::PathBuf;

const DEFAULT_DATA_FILE: &str = "campus.json";

/// Runtime configuration, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_level: log::LevelFilter,
    pub pretty_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: log::LevelFilter::Info,
            pretty_json: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        // A missing .env is fine, a malformed one is not
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("CAMPUS_DATA_FILE") {
            if path.trim().is_empty() {
                return Err(AppError::ConfigError(
                    "CAMPUS_DATA_FILE cannot be empty".to_string(),
                ));
            }
            config.data_file = PathBuf::from(path);
        }

        if let Some(level) = lookup("CAMPUS_LOG_LEVEL") {
            config.log_level = level.parse().map_err(|_| {
                AppError::ConfigError(format!("Unknown log level '{}'", level))
            })?;
        }

        if let Some(pretty) = lookup("CAMPUS_PRETTY_JSON") {
            config.pretty_json = match pretty.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(AppError::ConfigError(format!(
                        "CAMPUS_PRETTY_JSON must be a boolean, got '{}'",
                        other
                    )))
                }
            };
        }

        Ok(config)
    }
}
