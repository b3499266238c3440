//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// JSON file holding the latest status record
    pub status_file: PathBuf,

    /// ONNX export of the door state classifier
    pub model_path: PathBuf,

    /// Recent activity used when a prediction request doesn't carry one
    pub default_recent_activity: f32,

    /// Temperature used when a prediction request doesn't carry one
    pub default_temperature: f32,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format ("pretty" or "json")
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            status_file: PathBuf::from("data/esp_data.json"),
            model_path: PathBuf::from("models/door_model.onnx"),
            default_recent_activity: 5.0,
            default_temperature: 22.5,
            environment: "development".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),

            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            status_file: lookup("STATUS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.status_file),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            default_recent_activity: lookup("DEFAULT_RECENT_ACTIVITY")
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(defaults.default_recent_activity),

            default_temperature: lookup("DEFAULT_TEMPERATURE")
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|v| v.is_finite())
                .unwrap_or(defaults.default_temperature),

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_format: lookup("LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
