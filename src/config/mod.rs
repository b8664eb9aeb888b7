//! Configuration module for geomux
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`GEOMUX_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use geomux::config::GeomuxConfig;
//! use geomux::provider::ProviderId;
//!
//! let toml = r#"
//! [[providers]]
//! type = "google"
//! api_key_env = "GOOGLE_GEOCODE_KEY"
//! "#;
//! let config: GeomuxConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.providers[0].provider, ProviderId::Google);
//! assert_eq!(config.lookup.provider_timeout_ms, 10_000);
//! ```

pub mod error;
pub mod logging;
pub mod lookup;
pub mod provider;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use lookup::LookupConfig;
pub use provider::ProviderConfig;

use crate::selector::ThrottlePolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for the geocoding orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeomuxConfig {
    /// Failover and throttling behaviour
    pub lookup: LookupConfig,
    /// Providers in tie-break order
    pub providers: Vec<ProviderConfig>,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl GeomuxConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports GEOMUX_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("GEOMUX_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("GEOMUX_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(timeout) = std::env::var("GEOMUX_PROVIDER_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.lookup.provider_timeout_ms = ms;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.provider_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "lookup.provider_timeout_ms",
                "timeout must be non-zero",
            ));
        }

        if let ThrottlePolicy::Exponential {
            initial_delay_seconds,
            max_delay_seconds,
            multiplier,
        } = &self.lookup.throttle
        {
            if !multiplier.is_finite() || *multiplier < 1.0 {
                return Err(ConfigError::invalid(
                    "lookup.throttle.multiplier",
                    "multiplier must be at least 1.0",
                ));
            }
            if max_delay_seconds < initial_delay_seconds {
                return Err(ConfigError::invalid(
                    "lookup.throttle.max_delay_seconds",
                    "max delay must not be below the initial delay",
                ));
            }
        }

        if self.providers.is_empty() {
            return Err(ConfigError::invalid(
                "providers",
                "at least one provider must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for (i, provider) in self.providers.iter().enumerate() {
            if !seen.insert(provider.provider) {
                return Err(ConfigError::invalid(
                    format!("providers[{}].type", i),
                    format!("provider '{}' configured more than once", provider.provider),
                ));
            }
            if !provider.has_key_source() {
                return Err(ConfigError::invalid(
                    format!("providers[{}].api_key", i),
                    "either api_key or api_key_env must be set",
                ));
            }
        }

        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;
    use std::path::Path;

    fn google() -> ProviderConfig {
        ProviderConfig {
            provider: ProviderId::Google,
            api_key: Some("key".to_string()),
            api_key_env: None,
            base_url: None,
        }
    }

    fn valid_config() -> GeomuxConfig {
        GeomuxConfig {
            providers: vec![google()],
            ..Default::default()
        }
    }

    #[test]
    fn test_geomux_config_defaults() {
        let config = GeomuxConfig::default();
        assert_eq!(config.lookup.provider_timeout_ms, 10_000);
        assert_eq!(config.lookup.throttle, ThrottlePolicy::Disabled);
        assert!(config.providers.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../geomux.example.toml");
        let config: GeomuxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].provider, ProviderId::Google);
        assert_eq!(config.providers[1].provider, ProviderId::Bing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_throttle_section() {
        let toml = r#"
        [lookup]
        provider_timeout_ms = 2500

        [lookup.throttle]
        mode = "exponential"
        initial_delay_seconds = 30
        max_delay_seconds = 900
        multiplier = 2.0
        "#;

        let config: GeomuxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.lookup.provider_timeout_ms, 2500);
        assert!(matches!(
            config.lookup.throttle,
            ThrottlePolicy::Exponential { initial_delay_seconds: 30, .. }
        ));
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            "[[providers]]\ntype = \"bing\"\napi_key = \"abc\"",
        )
        .unwrap();

        let config = GeomuxConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.providers[0].provider, ProviderId::Bing);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[[providers]\ntype =").unwrap();

        let result = GeomuxConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse { ref path, .. }) if path == temp.path()));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = GeomuxConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = GeomuxConfig::load(None).unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("GEOMUX_LOG_LEVEL", "debug");
        let config = GeomuxConfig::default().with_env_overrides();
        std::env::remove_var("GEOMUX_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("GEOMUX_LOG_FORMAT", "json");
        let config = GeomuxConfig::default().with_env_overrides();
        assert_eq!(config.logging.format, LogFormat::Json);

        std::env::set_var("GEOMUX_LOG_FORMAT", "xml");
        let config = GeomuxConfig::default().with_env_overrides();
        std::env::remove_var("GEOMUX_LOG_FORMAT");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_env_override_timeout() {
        std::env::set_var("GEOMUX_PROVIDER_TIMEOUT_MS", "1500");
        let config = GeomuxConfig::default().with_env_overrides();
        assert_eq!(config.lookup.provider_timeout_ms, 1500);

        std::env::set_var("GEOMUX_PROVIDER_TIMEOUT_MS", "soon");
        let config = GeomuxConfig::default().with_env_overrides();
        std::env::remove_var("GEOMUX_PROVIDER_TIMEOUT_MS");
        assert_eq!(config.lookup.provider_timeout_ms, 10_000);
    }

    #[test]
    fn test_config_validation_no_providers() {
        let result = GeomuxConfig::default().validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "providers"
        ));
    }

    #[test]
    fn test_config_validation_duplicate_provider() {
        let mut config = valid_config();
        config.providers.push(google());

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "providers[1].type"
        ));
    }

    #[test]
    fn test_config_validation_missing_key_source() {
        let mut config = valid_config();
        config.providers[0].api_key = None;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("api_key")
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = valid_config();
        config.lookup.provider_timeout_ms = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "lookup.provider_timeout_ms"
        ));
    }

    #[test]
    fn test_config_validation_shrinking_multiplier() {
        let mut config = valid_config();
        config.lookup.throttle = ThrottlePolicy::Exponential {
            initial_delay_seconds: 10,
            max_delay_seconds: 100,
            multiplier: 0.5,
        };

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "lookup.throttle.multiplier"
        ));
    }

    #[test]
    fn test_config_validation_unknown_log_component() {
        let mut config = valid_config();
        config.logging.component_levels = Some(
            [("dashboard".to_string(), "debug".to_string())]
                .into_iter()
                .collect(),
        );

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. })
                if field == "logging.component_levels.dashboard"
        ));
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }
}
