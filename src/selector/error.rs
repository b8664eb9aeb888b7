//! Selector error types

use crate::provider::ProviderId;
use thiserror::Error;

/// Errors that can occur while mutating selector state.
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("provider not managed by selector: {0}")]
    UnknownProvider(ProviderId),
}
