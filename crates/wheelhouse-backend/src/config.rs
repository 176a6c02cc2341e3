//! Settings bag and cache configuration
//!
//! Backends are configured from a flat key/value bag so the same settings can
//! come from a config file in production or be assembled by hand in tests.

use crate::error::{BackendError, Result};
use std::collections::HashMap;
use std::env;
use tracing::info;

const ENV_PREFIX: &str = "WHEELHOUSE_";

/// Flat key/value configuration bag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect settings from `WHEELHOUSE_*` environment variables.
    ///
    /// The prefix is stripped and the remainder lowercased, so
    /// `WHEELHOUSE_ALLOW_OVERWRITE=1` becomes the key `allow_overwrite`.
    pub fn from_env() -> Self {
        let values = env::vars()
            .filter_map(|(key, value)| {
                let key = key.strip_prefix(ENV_PREFIX)?;
                Some((key.to_lowercase(), value))
            })
            .collect();
        Self { values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Read a boolean setting, falling back to `default` when unset
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        match value.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(BackendError::Config(format!(
                "invalid boolean for {}: {}",
                key, other
            ))),
        }
    }
}

/// Cache behavior parsed from settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheConfig {
    /// Whether uploading a filename that already exists replaces it
    pub allow_overwrite: bool,
}

impl CacheConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let allow_overwrite = settings.get_bool("allow_overwrite", false)?;
        info!(allow_overwrite, "Cache configuration loaded");
        Ok(Self { allow_overwrite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let settings = Settings::new();
        assert_eq!(settings.get("allow_overwrite"), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut settings = Settings::new();
        settings.set("allow_overwrite", "true");
        assert_eq!(settings.get("allow_overwrite"), Some("true"));
    }

    #[test]
    fn test_get_bool_default() {
        let settings = Settings::new();
        assert!(!settings.get_bool("allow_overwrite", false).unwrap());
        assert!(settings.get_bool("allow_overwrite", true).unwrap());
    }

    #[test]
    fn test_get_bool_accepted_spellings() {
        let mut settings = Settings::new();
        for value in ["1", "true", "YES", "on"] {
            settings.set("flag", value);
            assert!(settings.get_bool("flag", false).unwrap());
        }
        for value in ["0", "false", "NO", "off"] {
            settings.set("flag", value);
            assert!(!settings.get_bool("flag", true).unwrap());
        }
    }

    #[test]
    fn test_get_bool_rejects_garbage() {
        let mut settings = Settings::new();
        settings.set("flag", "maybe");
        let err = settings.get_bool("flag", false).unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Configuration error: invalid boolean for flag: maybe"
        );
    }

    #[test]
    fn test_from_env_strips_prefix() {
        env::set_var("WHEELHOUSE_FROM_ENV_PROBE", "42");
        let settings = Settings::from_env();
        assert_eq!(settings.get("from_env_probe"), Some("42"));
        env::remove_var("WHEELHOUSE_FROM_ENV_PROBE");
    }

    #[test]
    fn test_cache_config_from_settings() {
        let mut settings = Settings::new();
        settings.set("allow_overwrite", "yes");
        let config = CacheConfig::from_settings(&settings).unwrap();
        assert!(config.allow_overwrite);
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::from_settings(&Settings::new()).unwrap();
        assert!(!config.allow_overwrite);
    }
}
