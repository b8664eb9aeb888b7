//! Lookup command implementation

use crate::cli::{output, LookupArgs};
use crate::config::{GeomuxConfig, LogFormat};
use crate::geocode::GeocodeManager;
use crate::provider::GeocodeRequest;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &LookupArgs,
) -> Result<GeomuxConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        GeomuxConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        GeomuxConfig::default()
    };

    config = config.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.lookup.provider_timeout_ms = timeout_ms;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    // Logs go to stderr so stdout stays parseable with --json
    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

fn build_request(args: &LookupArgs) -> GeocodeRequest {
    let mut request = GeocodeRequest::new(&args.address);
    if let Some(ref locale) = args.locale {
        request = request.with_locale(locale.clone());
    }
    if let Some(ref region) = args.region {
        request = request.with_region(region.clone());
    }
    request
}

/// Run a single lookup and print the aggregate result.
///
/// Ctrl-C drops the in-flight provider call, skips the remaining providers
/// and reports the lookup as cancelled.
pub async fn run_lookup(
    config: GeomuxConfig,
    args: &LookupArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let manager = GeocodeManager::from_config(&config)?;

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    let signal_handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received SIGINT, cancelling lookup");
            signal_token.cancel();
        }
    });

    let result = manager
        .geocode_cancellable(build_request(args), &cancel_token)
        .await;
    signal_handle.abort();
    let result = result?;

    if args.json {
        Ok(output::format_lookup_json(&result)?)
    } else {
        Ok(output::format_lookup_table(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(config: PathBuf) -> LookupArgs {
        LookupArgs {
            address: "Paris".to_string(),
            config,
            json: false,
            log_level: None,
            timeout_ms: None,
            locale: None,
            region: None,
        }
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config =
            load_config_with_overrides(&args(PathBuf::from("/nonexistent/geomux.toml"))).unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_cli_overrides_win() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            temp.path(),
            "[lookup]\nprovider_timeout_ms = 5000\n\n[[providers]]\ntype = \"google\"\napi_key = \"k\"\n",
        )
        .unwrap();

        let mut args = args(temp.path().to_path_buf());
        args.timeout_ms = Some(750);
        args.log_level = Some("trace".to_string());

        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.lookup.provider_timeout_ms, 750);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.providers.len(), 1);
    }

    #[test]
    fn test_invalid_config_file_is_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[[providers]\n").unwrap();
        assert!(load_config_with_overrides(&args(temp.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_build_request_carries_hints() {
        let mut args = args(PathBuf::from("geomux.toml"));
        args.locale = Some("fr".to_string());
        args.region = Some("fr".to_string());

        let request = build_request(&args);
        assert_eq!(request.address, "Paris");
        assert_eq!(request.address_key, "sirap");
        assert_eq!(request.locale.as_deref(), Some("fr"));
        assert_eq!(request.region.as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn test_run_lookup_without_providers_fails() {
        let result = run_lookup(GeomuxConfig::default(), &args(PathBuf::from("x"))).await;
        assert!(result.is_err());
    }
}
