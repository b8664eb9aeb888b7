//! Provider abstraction layer.
//!
//! This module provides the `GeocodeProvider` trait and supporting types that
//! hide each geocoding service's wire format behind one capability interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod bing;
pub mod error;
pub mod factory;
pub mod google;
pub mod types;

pub use bing::BingProvider;
pub use error::ProviderError;
pub use factory::create_provider;
pub use google::GoogleProvider;
pub use types::{Bounds, GeocodeRequest, LatLon, Location, ProviderResponse};

/// Stable identifier of a geocoding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Google,
    Bing,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Google, Self::Bing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
        }
    }

    /// Public endpoint used when the config has no `base_url`.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Google => google::GOOGLE_ENDPOINT,
            Self::Bing => bing::BING_ENDPOINT,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "bing" => Ok(Self::Bing),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

/// Uniform interface for all geocoding providers.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn GeocodeProvider>`.
///
/// # Failure Contract
///
/// `geocode` never returns an error. Implementations run the full
/// classification pipeline from [`crate::status::pipeline`] and report every
/// ordinary failure (bad HTTP status, malformed payload, missing geometry,
/// transport errors) as a non-success [`ProviderResponse`].
///
/// # Cancellation Safety
///
/// Dropping the future aborts any in-flight HTTP request.
#[async_trait]
pub trait GeocodeProvider: Send + Sync + 'static {
    /// Which provider this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Geocode a single request.
    async fn geocode(&self, request: &GeocodeRequest) -> ProviderResponse;
}
