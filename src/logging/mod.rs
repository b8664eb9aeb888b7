//! Structured logging support.
//!
//! This module provides the stable event vocabulary used by the classification
//! pipeline and the orchestrator, plus helpers for building subscriber filters
//! and per-lookup identifiers.

pub mod events;

pub use events::LogEvent;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use geomux::config::logging::{LogFormat, LoggingConfig};
/// use geomux::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("selector".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,geomux::selector=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",geomux::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a unique identifier for one address lookup.
pub fn generate_lookup_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::logging::{LogFormat, LoggingConfig};
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_level_only() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn test_filter_directives_components_sorted() {
        let mut levels = HashMap::new();
        levels.insert("selector".to_string(), "trace".to_string());
        levels.insert("geocode".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "warn".to_string(),
            format: LogFormat::Json,
            component_levels: Some(levels),
        };

        assert_eq!(
            build_filter_directives(&config),
            "warn,geomux::geocode=debug,geomux::selector=trace"
        );
    }

    #[test]
    fn test_lookup_ids_are_unique_uuids() {
        let a = generate_lookup_id();
        let b = generate_lookup_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert_eq!(a.split('-').count(), 5);
    }
}
