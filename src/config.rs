//! Runtime configuration
//!
//! Layering, lowest to highest priority: built-in defaults, the optional JSON
//! file at `<config dir>/dinewise/config.json`, then environment variables.
//! A `.env` file in the working directory is loaded before anything else.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini credential. Never written back to disk.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub geolocation_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded .env from working directory");
        }

        let mut config = match Self::file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;

        tracing::info!(
            model = %config.model,
            api_base = %config.api_base,
            has_api_key = config.api_key.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// `<config dir>/dinewise/config.json`, if the platform has a config dir
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dinewise").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let lookup = |key: &str| env::var(key).ok();
        self.apply_overrides(lookup)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Some(model) = lookup("DINEWISE_MODEL") {
            if model.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "DINEWISE_MODEL".to_string(),
                    value: model,
                });
            }
            self.model = model.trim().to_string();
        }
        if let Some(base) = lookup("DINEWISE_API_BASE") {
            self.api_base = validate_url("DINEWISE_API_BASE", base)?;
        }
        if let Some(url) = lookup("DINEWISE_GEOLOCATION_URL") {
            self.geolocation_url = validate_url("DINEWISE_GEOLOCATION_URL", url)?;
        }
        Ok(())
    }

    /// The credential, or an error naming the variables to set
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

fn validate_url(key: &str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_gemini_key_wins_over_api_key() {
        let env = vars(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "fallback")]);
        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.require_api_key().unwrap(), "primary");
    }

    #[test]
    fn test_api_key_fallback_and_overrides() {
        let env = vars(&[
            ("API_KEY", "  secret "),
            ("DINEWISE_MODEL", "gemini-2.0-flash"),
            ("DINEWISE_API_BASE", "http://127.0.0.1:9000/"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let env = vars(&[("DINEWISE_API_BASE", "ftp://example.com")]);
        let mut config = Config::default();
        let err = config.apply_overrides(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_file_never_carries_key_out() {
        let mut config = Config::default();
        config.api_key = Some("secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));

        let parsed: Config = serde_json::from_str(r#"{"model":"custom"}"#).unwrap();
        assert_eq!(parsed.model, "custom");
        assert_eq!(parsed.api_base, DEFAULT_API_BASE);
    }
}
