//! Provider factory for creating GeocodeProvider trait objects from configuration.

use super::{BingProvider, GeocodeProvider, GoogleProvider, ProviderError, ProviderId};
use crate::config::ProviderConfig;
use reqwest::Client;
use std::sync::Arc;

/// Create a provider from its configuration entry.
///
/// The API key comes from `api_key` when set, otherwise from the environment
/// variable named by `api_key_env`.
///
/// # Examples
///
/// ```
/// use geomux::config::ProviderConfig;
/// use geomux::provider::{create_provider, ProviderId};
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let config = ProviderConfig {
///     provider: ProviderId::Google,
///     api_key: Some("my-key".to_string()),
///     api_key_env: None,
///     base_url: None,
/// };
///
/// let provider = create_provider(&config, Arc::new(Client::new())).unwrap();
/// assert_eq!(provider.id(), ProviderId::Google);
/// ```
pub fn create_provider(
    config: &ProviderConfig,
    client: Arc<Client>,
) -> Result<Arc<dyn GeocodeProvider>, ProviderError> {
    let api_key = resolve_api_key(config)?;

    let provider: Arc<dyn GeocodeProvider> = match config.provider {
        ProviderId::Google => {
            let provider = GoogleProvider::new(api_key, client);
            match &config.base_url {
                Some(url) => Arc::new(provider.with_endpoint(url.clone())),
                None => Arc::new(provider),
            }
        }
        ProviderId::Bing => {
            let provider = BingProvider::new(api_key, client);
            match &config.base_url {
                Some(url) => Arc::new(provider.with_endpoint(url.clone())),
                None => Arc::new(provider),
            }
        }
    };

    Ok(provider)
}

fn resolve_api_key(config: &ProviderConfig) -> Result<String, ProviderError> {
    if let Some(key) = &config.api_key {
        return Ok(key.clone());
    }

    if let Some(env_var) = &config.api_key_env {
        return std::env::var(env_var).map_err(|e| {
            ProviderError::Configuration(format!(
                "Failed to read API key from env var '{}': {}",
                env_var, e
            ))
        });
    }

    Err(ProviderError::Configuration(format!(
        "{} provider requires 'api_key' or 'api_key_env'",
        config.provider
    )))
}
