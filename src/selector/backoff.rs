//! Throttle window policy applied when a provider reports rate limiting.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long to bench a provider after it answers `TooManyRequests`.
///
/// `strike` counts consecutive rate-limit answers from the same provider,
/// starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ThrottlePolicy {
    /// Never throttle automatically
    #[default]
    Disabled,
    /// Same window for every strike
    Fixed { delay_seconds: u64 },
    /// `initial * multiplier^(strike - 1)`, capped at `max_delay_seconds`
    Exponential {
        initial_delay_seconds: u64,
        max_delay_seconds: u64,
        multiplier: f64,
    },
}

impl ThrottlePolicy {
    /// Window for the given strike, or `None` when nothing should be applied.
    pub fn delay_for(&self, strike: u32) -> Option<Duration> {
        match self {
            Self::Disabled => None,
            Self::Fixed { delay_seconds } => Some(Duration::from_secs(*delay_seconds)),
            Self::Exponential {
                initial_delay_seconds,
                max_delay_seconds,
                multiplier,
            } => {
                let exponent = strike.saturating_sub(1).min(i32::MAX as u32) as i32;
                let seconds = *initial_delay_seconds as f64 * multiplier.powi(exponent);
                let capped = seconds.min(*max_delay_seconds as f64).max(0.0);
                Some(
                    Duration::try_from_secs_f64(capped)
                        .unwrap_or_else(|_| Duration::from_secs(*max_delay_seconds)),
                )
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}
