//! `[logging]` section
//!
//! Lookups log to stderr so that `geomux lookup --json` keeps stdout clean.
//! Component overrides are keyed by geomux module name and become
//! `geomux::<component>=<level>` filter directives.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Levels accepted for `level` and for every component override.
pub const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Modules that emit their own tracing targets.
pub const COMPONENTS: &[&str] = &[
    "cli", "config", "geocode", "key", "provider", "registry", "selector", "status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line human output
    #[default]
    Pretty,
    /// One JSON object per event, with the `lookup_id` span attached
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid(
                "logging.format",
                format!("unknown format '{}', expected pretty or json", s),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every target
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels, e.g. `{"selector": "debug", "geocode": "trace"}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject unknown levels and components before they reach the filter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_level("logging.level", &self.level)?;

        let Some(levels) = &self.component_levels else {
            return Ok(());
        };
        let mut components: Vec<_> = levels.iter().collect();
        components.sort();
        for (component, level) in components {
            let field = format!("logging.component_levels.{}", component);
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("unknown component, expected one of: {}", COMPONENTS.join(", ")),
                ));
            }
            check_level(&field, level)?;
        }

        Ok(())
    }
}

fn check_level(field: &str, level: &str) -> Result<(), ConfigError> {
    if LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("unknown level '{}', expected one of: {}", level, LEVELS.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_components(pairs: &[(&str, &str)]) -> LoggingConfig {
        LoggingConfig {
            component_levels: Some(
                pairs
                    .iter()
                    .map(|(c, l)| (c.to_string(), l.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_logging_defaults_validate() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str(" PRETTY ").unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str_names_field() {
        let err = LogFormat::from_str("xml").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation { ref field, .. } if field == "logging.format"
        ));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_component_levels_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            level = "warn"
            format = "json"
            [component_levels]
            selector = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_base_level_rejected() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_unknown_component_rejected() {
        let config = with_components(&[("geocode", "debug"), ("routing", "debug")]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. })
                if field == "logging.component_levels.routing"
        ));
    }

    #[test]
    fn test_component_level_checked() {
        let config = with_components(&[("selector", "loud")]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_levels_case_insensitive() {
        let mut config = with_components(&[("provider", "TRACE")]);
        config.level = "Debug".to_string();
        assert!(config.validate().is_ok());
    }
}
