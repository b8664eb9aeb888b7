//! Orchestrator error types

use crate::config::ConfigError;
use crate::provider::ProviderError;
use crate::registry::RegistryError;
use thiserror::Error;

/// Errors raised while building the orchestrator or when a caller cancels.
///
/// Ordinary lookup failures are reported through
/// [`super::AggregateResult::status`], never through this type.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("no geocoding providers configured")]
    NoProviders,

    #[error("lookup cancelled")]
    Cancelled,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
