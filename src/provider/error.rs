//! Error types for provider construction.

use thiserror::Error;

/// Errors raised while building a provider from configuration.
///
/// Lookups never fail with these; call-time failures are classified into a
/// [`crate::status::CanonicalStatus`] instead.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}
