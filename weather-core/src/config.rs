use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::WeatherError;

/// Environment variable that overrides the API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Fixed target location of the panel; overridable via the config file but
/// not per request.
pub const DEFAULT_PLACE: &str = "Jianye,Nanjing,CN";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// place = "Jianye,Nanjing,CN"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Place name passed to the geocoding lookup.
    #[serde(default = "default_place")]
    pub place: String,

    /// OpenWeatherMap API key. May instead be supplied via
    /// `OPENWEATHERMAP_API_KEY`, which takes precedence.
    pub api_key: Option<String>,
}

fn default_place() -> String {
    DEFAULT_PLACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            place: default_place(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults if the file doesn't exist yet),
    /// then apply the environment override for the API key.
    pub fn load() -> Result<Self, WeatherError> {
        let mut cfg = Self::load_file()?;

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                cfg.api_key = Some(key);
            }
        }

        Ok(cfg)
    }

    fn load_file() -> Result<Self, WeatherError> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            WeatherError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            WeatherError::Config(format!("Failed to parse config file {}: {e}", path.display()))
        })
    }

    /// Path to the config file.
    fn config_file_path() -> Result<PathBuf, WeatherError> {
        let dirs = ProjectDirs::from("dev", "weather-panel", "weather-panel").ok_or_else(|| {
            WeatherError::Config("Could not determine platform config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The API key, or a `Config` error with a setup hint when absent.
    pub fn require_api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WeatherError::Config(format!(
                    "OpenWeatherMap API key is missing.\n\
                     Hint: set the {API_KEY_ENV} environment variable, \
                     or add `api_key = \"...\"` to the config file."
                ))
            })
    }
}
