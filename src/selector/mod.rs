//! Provider selection.
//!
//! Picks the next provider to try using round-robin-by-usage: among providers
//! that are not excluded and not inside a throttle window, the one with the
//! lowest request count wins, ties going to the first registered provider.

pub mod backoff;
pub mod clock;
pub mod error;

pub use backoff::ThrottlePolicy;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SelectorError;

use crate::provider::ProviderId;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Usage and throttle state for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderState {
    pub provider: ProviderId,
    /// Provider is ineligible while `now < do_not_use_before`
    pub do_not_use_before: DateTime<Utc>,
    pub request_count: u64,
}

impl ProviderState {
    pub fn is_eligible(&self, now: DateTime<Utc>) -> bool {
        now >= self.do_not_use_before
    }
}

/// Chooses which provider the orchestrator should try next.
///
/// Returning `None` from [`ProviderSelector::next`] is not an error; it means
/// no provider is eligible right now.
#[async_trait]
pub trait ProviderSelector: Send + Sync + 'static {
    /// Select and reserve the next eligible provider not in `excluding`.
    async fn next(&self, excluding: &HashSet<ProviderId>) -> Option<ProviderId>;

    /// Keep `provider` out of rotation until `until`.
    async fn set_throttle(
        &self,
        provider: ProviderId,
        until: DateTime<Utc>,
    ) -> Result<(), SelectorError>;

    /// Snapshot of every provider's state, in registration order.
    async fn states(&self) -> Vec<ProviderState>;
}

/// Single-process selector holding its state in memory.
///
/// Counters are not persisted and are not shared between processes.
pub struct InMemorySelector {
    states: Mutex<Vec<ProviderState>>,
    clock: Arc<dyn Clock>,
}

impl InMemorySelector {
    /// Every provider starts immediately eligible with a zero request count.
    pub fn new(providers: impl IntoIterator<Item = ProviderId>, clock: Arc<dyn Clock>) -> Self {
        let eligible_from = clock.now() - Duration::days(1);
        let mut states: Vec<ProviderState> = Vec::new();
        for provider in providers {
            if states.iter().any(|s| s.provider == provider) {
                continue;
            }
            states.push(ProviderState {
                provider,
                do_not_use_before: eligible_from,
                request_count: 0,
            });
        }

        Self {
            states: Mutex::new(states),
            clock,
        }
    }

    /// Synchronous core of [`ProviderSelector::next`].
    pub fn select(&self, excluding: &HashSet<ProviderId>) -> Option<ProviderId> {
        let now = self.clock.now();
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);

        // min_by_key keeps the first minimum, so registration order breaks ties
        let chosen = states
            .iter_mut()
            .filter(|s| !excluding.contains(&s.provider))
            .filter(|s| s.is_eligible(now))
            .min_by_key(|s| s.request_count)?;

        chosen.request_count += 1;
        Some(chosen.provider)
    }

    fn throttle(&self, provider: ProviderId, until: DateTime<Utc>) -> Result<(), SelectorError> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let state = states
            .iter_mut()
            .find(|s| s.provider == provider)
            .ok_or(SelectorError::UnknownProvider(provider))?;
        state.do_not_use_before = until;
        Ok(())
    }

    /// Synchronous core of [`ProviderSelector::states`].
    pub fn snapshot(&self) -> Vec<ProviderState> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProviderSelector for InMemorySelector {
    async fn next(&self, excluding: &HashSet<ProviderId>) -> Option<ProviderId> {
        self.select(excluding)
    }

    async fn set_throttle(
        &self,
        provider: ProviderId,
        until: DateTime<Utc>,
    ) -> Result<(), SelectorError> {
        self.throttle(provider, until)
    }

    async fn states(&self) -> Vec<ProviderState> {
        self.snapshot()
    }
}
