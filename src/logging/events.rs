//! Stable log event identifiers.
//!
//! Every pipeline short-circuit and every orchestration decision is logged with
//! one of these identifiers so operators can filter failure classes on the
//! `event_id` / `event` fields instead of parsing message text. Codes are part
//! of the public contract and must never be renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable, numbered log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEvent {
    /// Adapter pipeline passed every stage
    Success,
    /// Provider signalled a backoff out-of-band
    TooManyRequests,
    /// Raw provider payload (trace level only)
    ProviderResponse,
    /// HTTP-level failure or provider-reported error details
    ProviderError,
    /// Provider answered but found nothing
    ZeroResults,
    /// Transport failure or adapter panic caught at the boundary
    UnexpectedException,
    /// Address was empty or whitespace
    InputEmpty,
    /// Content status text missing from the mapping table
    UnknownContentStatus,
    /// Mapping entry flagged as permanent
    PermanentError,
    /// Mapping entry flagged as temporary
    TemporaryError,
    /// Successful status but no result list at all
    MissingResults,
    /// Payload could not be parsed or was `null`
    ReturnedNull,
    /// A result carried no geometry
    MissingGeometry,
    /// A result carried neither bounds nor a viewport
    MissingBounds,
    /// A result carried no usable point
    MissingLocation,
    /// Content status text was blank
    StatusEmpty,
    /// Orchestrator recorded a provider attempt
    ProviderAttempted,
    /// Orchestrator applied a throttle window
    ProviderThrottled,
    /// Selector had no eligible provider left
    ProvidersExhausted,
    /// Aggregate status computed
    LookupCompleted,
    /// Provider exceeded its call timeout
    ProviderTimeout,
    /// Caller cancelled the lookup
    LookupCancelled,
    /// Selector returned a provider the registry does not know
    ProviderNotRegistered,
}

impl LogEvent {
    pub const ALL: [Self; 23] = [
        Self::Success,
        Self::TooManyRequests,
        Self::ProviderResponse,
        Self::ProviderError,
        Self::ZeroResults,
        Self::UnexpectedException,
        Self::InputEmpty,
        Self::UnknownContentStatus,
        Self::PermanentError,
        Self::TemporaryError,
        Self::MissingResults,
        Self::ReturnedNull,
        Self::MissingGeometry,
        Self::MissingBounds,
        Self::MissingLocation,
        Self::StatusEmpty,
        Self::ProviderAttempted,
        Self::ProviderThrottled,
        Self::ProvidersExhausted,
        Self::LookupCompleted,
        Self::ProviderTimeout,
        Self::LookupCancelled,
        Self::ProviderNotRegistered,
    ];

    /// Numeric identifier emitted as the `event_id` field.
    pub const fn code(self) -> u32 {
        match self {
            Self::Success => 1,
            Self::TooManyRequests => 1001,
            Self::ProviderResponse => 1002,
            Self::ProviderError => 1003,
            Self::ZeroResults => 1004,
            Self::UnexpectedException => 1005,
            Self::InputEmpty => 1006,
            Self::UnknownContentStatus => 1007,
            Self::PermanentError => 1008,
            Self::TemporaryError => 1009,
            Self::MissingResults => 1010,
            Self::ReturnedNull => 2002,
            Self::MissingGeometry => 2003,
            Self::MissingBounds => 2004,
            Self::MissingLocation => 2005,
            Self::StatusEmpty => 2006,
            Self::ProviderAttempted => 3001,
            Self::ProviderThrottled => 3002,
            Self::ProvidersExhausted => 3003,
            Self::LookupCompleted => 3004,
            Self::ProviderTimeout => 3005,
            Self::LookupCancelled => 3006,
            Self::ProviderNotRegistered => 3007,
        }
    }

    /// Name emitted as the `event` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::TooManyRequests => "too_many_requests",
            Self::ProviderResponse => "provider_response",
            Self::ProviderError => "provider_error",
            Self::ZeroResults => "zero_results",
            Self::UnexpectedException => "unexpected_exception",
            Self::InputEmpty => "input_empty",
            Self::UnknownContentStatus => "unknown_content_status",
            Self::PermanentError => "permanent_error",
            Self::TemporaryError => "temporary_error",
            Self::MissingResults => "missing_results",
            Self::ReturnedNull => "returned_null",
            Self::MissingGeometry => "missing_geometry",
            Self::MissingBounds => "missing_bounds",
            Self::MissingLocation => "missing_location",
            Self::StatusEmpty => "status_empty",
            Self::ProviderAttempted => "provider_attempted",
            Self::ProviderThrottled => "provider_throttled",
            Self::ProvidersExhausted => "providers_exhausted",
            Self::LookupCompleted => "lookup_completed",
            Self::ProviderTimeout => "provider_timeout",
            Self::LookupCancelled => "lookup_cancelled",
            Self::ProviderNotRegistered => "provider_not_registered",
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
