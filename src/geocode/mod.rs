//! Failover orchestration.
//!
//! [`GeocodeManager`] asks the selector for a provider, calls it, records the
//! outcome and repeats with that provider excluded until one succeeds or the
//! selector runs dry. Providers are tried strictly one at a time.

pub mod error;
pub mod result;

pub use error::GeocodeError;
pub use result::{AggregateResult, Attempt, LookupStatus};

use crate::config::GeomuxConfig;
use crate::logging::{generate_lookup_id, LogEvent};
use crate::provider::{create_provider, GeocodeRequest, ProviderId, ProviderResponse};
use crate::registry::ProviderRegistry;
use crate::selector::{Clock, InMemorySelector, ProviderSelector, SystemClock, ThrottlePolicy};
use crate::status::CanonicalStatus;
use dashmap::DashMap;
use futures::FutureExt;
use reqwest::Client;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Default per-provider call timeout.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the failover loop across the registered providers.
///
/// Safe to share between concurrent lookups; selector state is the only
/// mutable state and the selector serializes access to it.
pub struct GeocodeManager {
    registry: Arc<ProviderRegistry>,
    selector: Arc<dyn ProviderSelector>,
    clock: Arc<dyn Clock>,
    provider_timeout: Duration,
    throttle: ThrottlePolicy,
    /// Consecutive rate-limit answers per provider
    strikes: DashMap<ProviderId, u32>,
}

impl GeocodeManager {
    /// Build a manager over an already populated registry.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::NoProviders` when the registry is empty.
    pub fn new(
        registry: Arc<ProviderRegistry>,
        selector: Arc<dyn ProviderSelector>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, GeocodeError> {
        if registry.is_empty() {
            return Err(GeocodeError::NoProviders);
        }

        Ok(Self {
            registry,
            selector,
            clock,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            throttle: ThrottlePolicy::default(),
            strikes: DashMap::new(),
        })
    }

    /// Build the full graph (HTTP client, providers, selector) from configuration.
    pub fn from_config(config: &GeomuxConfig) -> Result<Self, GeocodeError> {
        config.validate()?;

        let client = Arc::new(Client::new());
        let registry = Arc::new(ProviderRegistry::new());
        for provider_config in &config.providers {
            registry.add_provider(create_provider(provider_config, Arc::clone(&client))?)?;
        }

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let selector = Arc::new(InMemorySelector::new(
            registry.provider_ids(),
            Arc::clone(&clock),
        ));

        Ok(Self::new(registry, selector, clock)?
            .with_provider_timeout(Duration::from_millis(config.lookup.provider_timeout_ms))
            .with_throttle_policy(config.lookup.throttle.clone()))
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_throttle_policy(mut self, policy: ThrottlePolicy) -> Self {
        self.throttle = policy;
        self
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub fn selector(&self) -> &Arc<dyn ProviderSelector> {
        &self.selector
    }

    /// Geocode a free-text address.
    ///
    /// Never fails: every outcome, including "no provider was eligible", is
    /// reported through [`AggregateResult::status`].
    pub async fn geocode_address(&self, address: &str) -> AggregateResult {
        self.geocode(GeocodeRequest::new(address)).await
    }

    /// Like [`Self::geocode_address`] but aborts the in-flight provider call and
    /// skips remaining providers once `token` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::Cancelled` if the token fires before the lookup
    /// completes.
    pub async fn geocode_address_cancellable(
        &self,
        address: &str,
        token: &CancellationToken,
    ) -> Result<AggregateResult, GeocodeError> {
        self.geocode_cancellable(GeocodeRequest::new(address), token)
            .await
    }

    /// Cancellable form of [`Self::geocode`].
    pub async fn geocode_cancellable(
        &self,
        request: GeocodeRequest,
        token: &CancellationToken,
    ) -> Result<AggregateResult, GeocodeError> {
        let address_key = request.address_key.clone();

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::info!(
                    event_id = LogEvent::LookupCancelled.code(),
                    event = %LogEvent::LookupCancelled,
                    address_key = %address_key,
                    "lookup cancelled"
                );
                Err(GeocodeError::Cancelled)
            }
            result = self.geocode(request) => Ok(result),
        }
    }

    /// Geocode a prepared request, keeping its locale, region and bounds hints.
    #[instrument(
        name = "lookup",
        skip(self, request),
        fields(lookup_id = %generate_lookup_id(), address_key = %request.address_key)
    )]
    pub async fn geocode(&self, request: GeocodeRequest) -> AggregateResult {
        let mut tried: HashSet<ProviderId> = HashSet::new();
        let mut attempts: Vec<Attempt> = Vec::new();
        let mut winner = None;
        let mut locations = Vec::new();

        while let Some(id) = self.selector.next(&tried).await {
            if !tried.insert(id) {
                // a selector that ignores exclusions must not loop forever
                break;
            }

            let response = self.attempt(id, &request).await;
            attempts.push(Attempt {
                provider: id,
                status: response.status,
            });

            tracing::debug!(
                event_id = LogEvent::ProviderAttempted.code(),
                event = %LogEvent::ProviderAttempted,
                provider = %id,
                status = %response.status,
                attempt = attempts.len(),
                "provider attempted"
            );
            metrics::counter!(
                "geomux_provider_attempts_total",
                "provider" => id.as_str(),
                "status" => response.status.as_str()
            )
            .increment(1);

            match response.status {
                CanonicalStatus::Success => {
                    self.strikes.remove(&id);
                    winner = Some(id);
                    locations = response.locations;
                    break;
                }
                CanonicalStatus::TooManyRequests => self.apply_throttle(id).await,
                _ => {}
            }
        }

        if winner.is_none() {
            tracing::debug!(
                event_id = LogEvent::ProvidersExhausted.code(),
                event = %LogEvent::ProvidersExhausted,
                attempts = attempts.len(),
                "no eligible provider left"
            );
        }

        let status = LookupStatus::summarise(&attempts);
        tracing::info!(
            event_id = LogEvent::LookupCompleted.code(),
            event = %LogEvent::LookupCompleted,
            provider = winner.map(|p| p.as_str()).unwrap_or("none"),
            status = %status,
            attempts = attempts.len(),
            results = locations.len(),
            "lookup completed"
        );
        metrics::counter!("geomux_lookups_total", "status" => status.as_str()).increment(1);

        AggregateResult {
            provider: winner,
            status,
            locations,
            attempts,
            address_key: request.address_key,
        }
    }

    /// Call one provider, converting panics, timeouts and unknown ids into
    /// classified responses.
    async fn attempt(&self, id: ProviderId, request: &GeocodeRequest) -> ProviderResponse {
        let provider = match self.registry.require_provider(id) {
            Ok(provider) => provider,
            Err(e) => {
                tracing::warn!(
                    event_id = LogEvent::ProviderNotRegistered.code(),
                    event = %LogEvent::ProviderNotRegistered,
                    provider = %id,
                    "selector returned an unregistered provider"
                );
                return ProviderResponse::failure(
                    CanonicalStatus::Error,
                    LogEvent::ProviderNotRegistered,
                    e.to_string(),
                );
            }
        };

        let start = Instant::now();
        let call = AssertUnwindSafe(provider.geocode(request)).catch_unwind();
        let response = match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(panic)) => {
                let detail = panic_message(panic.as_ref());
                tracing::error!(
                    event_id = LogEvent::UnexpectedException.code(),
                    event = %LogEvent::UnexpectedException,
                    provider = %id,
                    detail = %detail,
                    "provider panicked"
                );
                ProviderResponse::failure(
                    CanonicalStatus::PermanentError,
                    LogEvent::UnexpectedException,
                    detail,
                )
            }
            Err(_) => {
                let timeout_ms = self.provider_timeout.as_millis() as u64;
                tracing::warn!(
                    event_id = LogEvent::ProviderTimeout.code(),
                    event = %LogEvent::ProviderTimeout,
                    provider = %id,
                    timeout_ms,
                    "provider timed out"
                );
                ProviderResponse::failure(
                    CanonicalStatus::TemporaryError,
                    LogEvent::ProviderTimeout,
                    format!("no answer within {}ms", timeout_ms),
                )
            }
        };

        metrics::histogram!("geomux_provider_latency_seconds", "provider" => id.as_str())
            .record(start.elapsed().as_secs_f64());

        response
    }

    /// Bench a rate-limited provider according to the throttle policy.
    async fn apply_throttle(&self, id: ProviderId) {
        let strike = {
            let mut strikes = self.strikes.entry(id).or_insert(0);
            *strikes = strikes.saturating_add(1);
            *strikes
        };

        let Some(delay) = self.throttle.delay_for(strike) else {
            return;
        };
        let until = chrono::Duration::from_std(delay)
            .ok()
            .and_then(|d| self.clock.now().checked_add_signed(d));
        let Some(until) = until else {
            tracing::warn!(provider = %id, delay_secs = delay.as_secs(), "throttle window out of range");
            return;
        };

        match self.selector.set_throttle(id, until).await {
            Ok(()) => tracing::info!(
                event_id = LogEvent::ProviderThrottled.code(),
                event = %LogEvent::ProviderThrottled,
                provider = %id,
                strike,
                delay_secs = delay.as_secs(),
                until = %until,
                "provider throttled"
            ),
            Err(e) => tracing::warn!(provider = %id, error = %e, "failed to throttle provider"),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("provider panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("provider panicked: {}", msg)
    } else {
        "provider panicked".to_string()
    }
}
