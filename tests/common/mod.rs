//! Shared test utilities for geomux integration tests.
//!
//! Provides scripted providers and helpers for wiring a `GeocodeManager`
//! against a manual clock.

#![allow(dead_code)]

use async_trait::async_trait;
use geomux::geocode::GeocodeManager;
use geomux::logging::LogEvent;
use geomux::provider::{GeocodeProvider, GeocodeRequest, LatLon, Location, ProviderId, ProviderResponse};
use geomux::registry::ProviderRegistry;
use geomux::selector::{InMemorySelector, ManualClock};
use geomux::status::CanonicalStatus;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Fake Providers
// =============================================================================

/// Provider answering from a script. The last entry repeats once exhausted.
pub struct FakeProvider {
    id: ProviderId,
    script: Mutex<Vec<CanonicalStatus>>,
    delay: Option<Duration>,
    calls: AtomicU32,
    last_request: Mutex<Option<GeocodeRequest>>,
}

impl FakeProvider {
    pub fn new(id: ProviderId, status: CanonicalStatus) -> Self {
        Self::scripted(id, vec![status])
    }

    pub fn scripted(id: ProviderId, mut script: Vec<CanonicalStatus>) -> Self {
        script.reverse();
        Self {
            id,
            script: Mutex::new(script),
            delay: None,
            calls: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GeocodeRequest> {
        self.last_request.lock().unwrap().clone()
    }

    fn next_status(&self) -> CanonicalStatus {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop().unwrap()
        } else {
            script[0]
        }
    }
}

#[async_trait]
impl GeocodeProvider for FakeProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn geocode(&self, request: &GeocodeRequest) -> ProviderResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_status() {
            CanonicalStatus::Success => ProviderResponse::success(vec![sample_location(self.id)]),
            CanonicalStatus::ZeroResults => {
                ProviderResponse::failure(CanonicalStatus::ZeroResults, LogEvent::ZeroResults, "")
            }
            status => ProviderResponse::failure(status, LogEvent::ProviderError, status.as_str()),
        }
    }
}

/// Location returned by a successful `FakeProvider`, tagged with the provider name.
pub fn sample_location(id: ProviderId) -> Location {
    Location::new(format!("{} result", id), LatLon::new(51.5034, -0.1276))
}

// =============================================================================
// Manager Builders
// =============================================================================

pub struct Harness {
    pub manager: GeocodeManager,
    pub clock: Arc<ManualClock>,
    pub selector: Arc<InMemorySelector>,
}

/// Register `providers` in order and build a manager over a manual clock.
pub fn harness(providers: Vec<Arc<FakeProvider>>) -> Harness {
    let registry = Arc::new(ProviderRegistry::new());
    for provider in providers {
        registry
            .add_provider(provider as Arc<dyn GeocodeProvider>)
            .unwrap();
    }

    let clock = Arc::new(ManualClock::default());
    let selector = Arc::new(InMemorySelector::new(
        registry.provider_ids(),
        clock.clone(),
    ));
    let manager = GeocodeManager::new(registry, selector.clone(), clock.clone()).unwrap();

    Harness {
        manager,
        clock,
        selector,
    }
}

/// Google and Bing fakes answering with fixed statuses.
pub fn pair(
    google: CanonicalStatus,
    bing: CanonicalStatus,
) -> (Arc<FakeProvider>, Arc<FakeProvider>) {
    (
        Arc::new(FakeProvider::new(ProviderId::Google, google)),
        Arc::new(FakeProvider::new(ProviderId::Bing, bing)),
    )
}
