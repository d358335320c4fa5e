use crate::cache::CacheConfig;
use crate::messages::MessageCatalog;
use crate::rules::otp::DEFAULT_OTP_LENGTH;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = ".checkout-validation.toml";

/// Configuration for the validation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub cache: CacheOptions,
    #[serde(default)]
    pub validation: ValidationOptions,
    /// Message overrides layered on the built-in English copy
    #[serde(default, skip_serializing_if = "MessageCatalog::is_empty")]
    pub messages: MessageCatalog,
}

/// Cache settings; unset values fall back to the environment, then defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOptions {
    pub enabled: Option<bool>,
    pub ttl_seconds: Option<u64>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub otp_length: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            otp_length: DEFAULT_OTP_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// Load config from file or use defaults
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            let content = fs::read_to_string(path)
                .context(format!("Failed to read config file: {}", path))?;
            Self::from_toml_str(&content)
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            let content = fs::read_to_string(DEFAULT_CONFIG_FILE)
                .context(format!("Failed to read {}", DEFAULT_CONFIG_FILE))?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config file")?;
        tracing::info!(
            "Validation config loaded: otp_length={}, message_overrides={}",
            config.validation.otp_length,
            config.messages.len()
        );
        Ok(config)
    }

    /// Effective cache settings: file values over environment over defaults
    pub fn cache_config(&self) -> CacheConfig {
        let mut config = CacheConfig::from_env();
        if let Some(enabled) = self.cache.enabled {
            config.enabled = enabled;
        }
        if let Some(secs) = self.cache.ttl_seconds {
            config.ttl = Duration::from_secs(secs);
        }
        if let Some(max_entries) = self.cache.max_entries {
            config.max_entries = max_entries;
        }
        config
    }

    /// Built-in English catalog with this config's overrides applied
    pub fn message_catalog(&self) -> MessageCatalog {
        let mut catalog = MessageCatalog::english();
        catalog.merge(self.messages.clone());
        catalog
    }

    /// Save config to file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context(format!("Failed to write config file: {}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.validation.otp_length, 6);
        assert!(config.messages.is_empty());
        assert_eq!(config.cache, CacheOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = ValidationConfig::from_toml_str(
            r#"
            [cache]
            enabled = false
            ttl_seconds = 5
            max_entries = 50

            [validation]
            otp_length = 4

            [messages]
            cvv_field = "Security code"
            "#,
        )
        .unwrap();

        let cache = config.cache_config();
        assert!(!cache.enabled);
        assert_eq!(cache.ttl, Duration::from_secs(5));
        assert_eq!(cache.max_entries, 50);
        assert_eq!(config.validation.otp_length, 4);
        assert_eq!(config.message_catalog().get("cvv_field"), Some("Security code"));
        assert_eq!(config.message_catalog().get("city_field"), Some("City"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ValidationConfig::from_toml_str("[cache]\nmax_entries = 10\n").unwrap();
        assert_eq!(config.validation.otp_length, 6);
        assert_eq!(config.cache_config().max_entries, 10);
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(ValidationConfig::from_toml_str("[cache\n").is_err());
        assert!(ValidationConfig::load(Some("/nonexistent/checkout.toml")).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        let path = path.to_str().unwrap();

        let mut config = ValidationConfig::default();
        config.cache.ttl_seconds = Some(12);
        config.messages.insert("email_field", "E-mail");
        config.save(path).unwrap();

        let loaded = ValidationConfig::load(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }
}
