//! Provider configuration

use crate::provider::ProviderId;
use serde::{Deserialize, Serialize};

/// One `[[providers]]` entry. Declaration order is the selector's tie-break order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "type")]
    pub provider: ProviderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Override the provider's public endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn has_key_source(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_key) || present(&self.api_key_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_parse() {
        let config: ProviderConfig = toml::from_str(
            r#"
            type = "bing"
            api_key_env = "BING_MAPS_KEY"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider, ProviderId::Bing);
        assert_eq!(config.api_key_env.as_deref(), Some("BING_MAPS_KEY"));
        assert!(config.api_key.is_none());
        assert!(config.has_key_source());
    }

    #[test]
    fn test_provider_config_blank_key_is_no_source() {
        let config = ProviderConfig {
            provider: ProviderId::Google,
            api_key: Some("  ".to_string()),
            api_key_env: None,
            base_url: None,
        };
        assert!(!config.has_key_source());
    }

    #[test]
    fn test_provider_config_unknown_type() {
        let result: Result<ProviderConfig, _> = toml::from_str("type = \"mapquest\"");
        assert!(result.is_err());
    }
}
