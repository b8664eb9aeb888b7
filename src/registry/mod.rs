//! Provider Registry module.
//!
//! Provides thread-safe in-memory storage of the configured geocoding providers.

mod error;

pub use error::*;

use crate::provider::{GeocodeProvider, ProviderId};
use dashmap::DashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// The Provider Registry stores every configured provider, keyed by id.
///
/// Registration order is preserved; the selector uses it to break ties.
///
/// # Examples
///
/// ```
/// use geomux::provider::{GoogleProvider, ProviderId};
/// use geomux::registry::ProviderRegistry;
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let registry = ProviderRegistry::new();
/// let google = GoogleProvider::new("key".to_string(), Arc::new(Client::new()));
///
/// registry.add_provider(Arc::new(google)).unwrap();
/// assert_eq!(registry.provider_ids(), vec![ProviderId::Google]);
/// ```
pub struct ProviderRegistry {
    providers: DashMap<ProviderId, Arc<dyn GeocodeProvider>>,
    order: RwLock<Vec<ProviderId>>,
}

impl ProviderRegistry {
    /// Create a new empty ProviderRegistry.
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Register a provider.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateProvider` if a provider with the same id
    /// is already registered.
    pub fn add_provider(&self, provider: Arc<dyn GeocodeProvider>) -> Result<(), RegistryError> {
        let id = provider.id();
        let mut order = self.order.write().unwrap_or_else(PoisonError::into_inner);

        if self.providers.contains_key(&id) {
            return Err(RegistryError::DuplicateProvider(id));
        }

        self.providers.insert(id, provider);
        order.push(id);
        Ok(())
    }

    /// Get a provider by id.
    pub fn get_provider(&self, id: ProviderId) -> Option<Arc<dyn GeocodeProvider>> {
        self.providers.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Like [`Self::get_provider`] but reports a missing provider as an error.
    pub fn require_provider(&self, id: ProviderId) -> Result<Arc<dyn GeocodeProvider>, RegistryError> {
        self.get_provider(id)
            .ok_or(RegistryError::ProviderNotFound(id))
    }

    /// Provider ids in registration order.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.order
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
