//! Ordered validation stages shared by the provider adapters.
//!
//! Each stage either passes its input through or short-circuits with a
//! [`Rejection`] carrying the terminal status and the stable event that names
//! the failure class. Adapters chain the stages with `?` and hand the outcome
//! to [`conclude`], which logs exactly one event and builds the response.

use super::{classify_http_status, lookup, CanonicalStatus, StatusMapping};
use crate::logging::LogEvent;
use crate::provider::{Location, ProviderId, ProviderResponse};
use serde::de::DeserializeOwned;
use std::fmt;

/// A stage short-circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub status: CanonicalStatus,
    pub event: LogEvent,
    pub detail: String,
}

impl Rejection {
    pub fn new(status: CanonicalStatus, event: LogEvent, detail: impl Into<String>) -> Self {
        Self {
            status,
            event,
            detail: detail.into(),
        }
    }

    /// Transport or I/O failure surfaced by the HTTP client.
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::new(
            CanonicalStatus::PermanentError,
            LogEvent::UnexpectedException,
            err.to_string(),
        )
    }
}

pub type StageResult<T> = Result<T, Rejection>;

/// Stage 1: blank addresses never reach the network.
pub fn validate_input(address: &str) -> StageResult<()> {
    if address.trim().is_empty() {
        return Err(Rejection::new(
            CanonicalStatus::InvalidRequest,
            LogEvent::InputEmpty,
            "address is empty",
        ));
    }
    Ok(())
}

/// Stage 2: transport status code.
pub fn validate_http_status(code: u16) -> StageResult<()> {
    match classify_http_status(code) {
        None => Ok(()),
        Some(status) => Err(Rejection::new(
            status,
            LogEvent::ProviderError,
            format!("HTTP {}", code),
        )),
    }
}

/// Stage 3: out-of-band rate limiting signal.
pub fn check_backoff_signal(signalled: bool, source: &str) -> StageResult<()> {
    if signalled {
        return Err(Rejection::new(
            CanonicalStatus::TooManyRequests,
            LogEvent::TooManyRequests,
            format!("backoff requested via {}", source),
        ));
    }
    Ok(())
}

/// Stage 4: parse the body, treating `null` the same as a malformed payload.
pub fn deserialize_payload<T: DeserializeOwned>(body: &str) -> StageResult<T> {
    match serde_json::from_str::<Option<T>>(body) {
        Ok(Some(payload)) => Ok(payload),
        Ok(None) => Err(Rejection::new(
            CanonicalStatus::PermanentError,
            LogEvent::ReturnedNull,
            "payload deserialized to null",
        )),
        Err(e) => Err(Rejection::new(
            CanonicalStatus::PermanentError,
            LogEvent::ReturnedNull,
            format!("payload could not be parsed: {}", e),
        )),
    }
}

/// Stage 5: look the provider's own status text up in its mapping table.
///
/// Table flags are authoritative: a permanent entry wins over a temporary one.
/// Any other non-success entry is treated as a zero-results answer.
pub fn classify_content_status(
    table: &[StatusMapping],
    raw: Option<&str>,
    error_message: Option<&str>,
) -> StageResult<()> {
    let raw = raw.map(str::trim).unwrap_or_default();
    let with_message = |text: &str| match error_message {
        Some(msg) if !msg.trim().is_empty() => format!("{}: {}", text, msg.trim()),
        _ => text.to_string(),
    };

    if raw.is_empty() {
        return Err(Rejection::new(
            CanonicalStatus::StatusEmpty,
            LogEvent::StatusEmpty,
            with_message("content status empty"),
        ));
    }

    let Some(entry) = lookup(table, raw) else {
        return Err(Rejection::new(
            CanonicalStatus::PermanentError,
            LogEvent::UnknownContentStatus,
            with_message(raw),
        ));
    };

    if entry.is_permanent_error {
        return Err(Rejection::new(
            entry.status,
            LogEvent::PermanentError,
            with_message(raw),
        ));
    }
    if entry.is_temporary_error {
        return Err(Rejection::new(
            entry.status,
            LogEvent::TemporaryError,
            with_message(raw),
        ));
    }
    if !entry.status.is_success() {
        return Err(Rejection::new(
            entry.status,
            LogEvent::ZeroResults,
            with_message(raw),
        ));
    }
    Ok(())
}

/// Stage 6: a successful status must come with at least one result.
pub fn require_results<T>(results: Option<Vec<T>>) -> StageResult<Vec<T>> {
    match results {
        None => Err(Rejection::new(
            CanonicalStatus::ZeroResults,
            LogEvent::MissingResults,
            "result list missing",
        )),
        Some(results) if results.is_empty() => Err(Rejection::new(
            CanonicalStatus::ZeroResults,
            LogEvent::ZeroResults,
            "result list empty",
        )),
        Some(results) => Ok(results),
    }
}

/// Log the pipeline outcome once and turn it into a response.
pub fn conclude(
    provider: ProviderId,
    address: &str,
    outcome: StageResult<Vec<Location>>,
) -> ProviderResponse {
    match outcome {
        Ok(locations) => {
            tracing::debug!(
                event_id = LogEvent::Success.code(),
                event = %LogEvent::Success,
                provider = %provider,
                address,
                results = locations.len(),
                "geocoded"
            );
            ProviderResponse::success(locations)
        }
        Err(rejection) => {
            log_rejection(provider, address, &rejection);
            ProviderResponse::rejected(rejection)
        }
    }
}

fn log_rejection(provider: ProviderId, address: &str, rejection: &Rejection) {
    let event_id = rejection.event.code();
    let event = rejection.event.as_str();
    let status = rejection.status.as_str();
    let detail = rejection.detail.as_str();

    match rejection.event {
        LogEvent::ReturnedNull | LogEvent::UnexpectedException => {
            tracing::error!(event_id, event, provider = %provider, address, status, detail, "provider call failed");
        }
        LogEvent::ZeroResults | LogEvent::MissingResults => {
            tracing::info!(event_id, event, provider = %provider, address, status, detail, "no results");
        }
        _ => {
            tracing::warn!(event_id, event, provider = %provider, address, status, detail, "provider rejected lookup");
        }
    }
}
