use crate::provider::ProviderId;

/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("provider already registered: {0}")]
    DuplicateProvider(ProviderId),

    #[error("provider not registered: {0}")]
    ProviderNotFound(ProviderId),
}
