//! CLI module for geomux
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `lookup` - Geocode an address across the configured providers
//! - `key` - Print the normalized address key for an address
//! - `providers` - Show configured providers and their selector state
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Geocode with the default config file
//! geomux lookup "10 Downing Street, London"
//!
//! # Machine-readable output
//! geomux lookup --json "Paris"
//!
//! # Generate shell completions
//! geomux completions bash > ~/.bash_completion.d/geomux
//! ```

pub mod completions;
pub mod config;
pub mod key;
pub mod lookup;
pub mod output;
pub mod providers;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use key::handle_key;
pub use lookup::{init_tracing, load_config_with_overrides, run_lookup};
pub use providers::handle_providers;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// geomux - multi-provider geocoding with failover
#[derive(Parser, Debug)]
#[command(
    name = "geomux",
    version,
    about = "Geocode addresses across several providers with failover and throttling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Geocode an address
    Lookup(LookupArgs),
    /// Print the normalized address key
    Key(KeyArgs),
    /// Show configured providers
    Providers(ProvidersArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Free-text address to geocode
    pub address: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "geomux.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GEOMUX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the per-provider timeout in milliseconds
    #[arg(short, long, env = "GEOMUX_PROVIDER_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Preferred result language (e.g. en, fr-CA)
    #[arg(long)]
    pub locale: Option<String>,

    /// Region bias (e.g. uk, us)
    #[arg(short, long)]
    pub region: Option<String>,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Address to normalize
    pub address: String,
}

#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "geomux.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "geomux.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
