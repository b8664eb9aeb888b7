//! Providers command implementation

use crate::cli::output::{format_providers_json, format_providers_table, ProviderView};
use crate::cli::ProvidersArgs;
use crate::config::{GeomuxConfig, ProviderConfig};
use crate::selector::{Clock, InMemorySelector, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;

/// Handle `geomux providers` command
///
/// Selector state lives in memory only, so a fresh process always reports
/// zero requests and immediate eligibility.
pub fn handle_providers(args: &ProvidersArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = GeomuxConfig::load(Some(&args.config))?;

    let views = provider_views(&config.providers, Arc::new(SystemClock));

    if args.json {
        Ok(format_providers_json(&views)?)
    } else {
        Ok(format_providers_table(&views))
    }
}

fn key_source(config: &ProviderConfig) -> String {
    match (&config.api_key, &config.api_key_env) {
        (Some(_), _) => "inline".to_string(),
        (None, Some(var)) => format!("${}", var),
        (None, None) => "missing".to_string(),
    }
}

fn provider_views(providers: &[ProviderConfig], clock: Arc<dyn Clock>) -> Vec<ProviderView> {
    let now = clock.now();
    let selector = InMemorySelector::new(providers.iter().map(|p| p.provider), clock);
    let states: HashMap<_, _> = selector
        .snapshot()
        .into_iter()
        .map(|s| (s.provider, s))
        .collect();

    providers
        .iter()
        .filter_map(|p| {
            let state = states.get(&p.provider)?;
            Some(ProviderView {
                provider: p.provider,
                endpoint: p
                    .base_url
                    .clone()
                    .unwrap_or_else(|| p.provider.default_endpoint().to_string()),
                key_source: key_source(p),
                request_count: state.request_count,
                eligible: state.is_eligible(now),
            })
        })
        .collect()
}
