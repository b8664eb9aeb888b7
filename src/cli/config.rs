//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::{GeomuxConfig, ProviderConfig};
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../geomux.example.toml");

/// Handle `geomux config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;
    println!("✓ Configuration file created: {}", args.output.display());

    let config: GeomuxConfig = toml::from_str(EXAMPLE_CONFIG)?;
    let missing = unset_key_vars(&config.providers, |name| std::env::var_os(name).is_some());
    if missing.is_empty() {
        println!("  All provider key variables are set.");
    } else {
        println!("  Set these before running a lookup: {}", missing.join(", "));
    }

    Ok(())
}

/// `api_key_env` names of providers without an inline key whose variable is unset.
fn unset_key_vars(providers: &[ProviderConfig], is_set: impl Fn(&str) -> bool) -> Vec<String> {
    providers
        .iter()
        .filter(|p| p.api_key.as_deref().map_or(true, |k| k.trim().is_empty()))
        .filter_map(|p| p.api_key_env.as_deref())
        .filter(|name| !is_set(name))
        .map(str::to_string)
        .collect()
}
