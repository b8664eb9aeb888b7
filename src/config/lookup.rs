//! Lookup behaviour configuration

use crate::selector::ThrottlePolicy;
use serde::{Deserialize, Serialize};

/// Per-lookup orchestration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Upper bound on a single provider call
    pub provider_timeout_ms: u64,
    /// Backoff applied when a provider reports rate limiting
    pub throttle: ThrottlePolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider_timeout_ms: 10_000,
            throttle: ThrottlePolicy::Disabled,
        }
    }
}
