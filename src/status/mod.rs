//! Canonical status taxonomy shared by every provider adapter.
//!
//! Providers each speak their own status vocabulary. Adapters translate it
//! through a static, ordered [`StatusMapping`] table into a [`CanonicalStatus`],
//! and the permanent / temporary flags on the table entry (not the enum value)
//! decide whether a failure is worth retrying.

pub mod pipeline;

pub use pipeline::{Rejection, StageResult};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-agnostic outcome of a single provider attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Success,
    ZeroResults,
    InvalidRequest,
    RequestDenied,
    TooManyRequests,
    TemporaryError,
    PermanentError,
    /// Generic provider failure, grouped with `PermanentError` when aggregating
    Error,
    /// Blank or unparsable status signal
    StatusEmpty,
}

impl CanonicalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ZeroResults => "zero_results",
            Self::InvalidRequest => "invalid_request",
            Self::RequestDenied => "request_denied",
            Self::TooManyRequests => "too_many_requests",
            Self::TemporaryError => "temporary_error",
            Self::PermanentError => "permanent_error",
            Self::Error => "error",
            Self::StatusEmpty => "status_empty",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a provider's status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMapping {
    /// Raw status text as the provider spells it
    pub status_text: &'static str,
    pub status: CanonicalStatus,
    pub is_permanent_error: bool,
    pub is_temporary_error: bool,
}

impl StatusMapping {
    pub const fn new(
        status_text: &'static str,
        status: CanonicalStatus,
        is_permanent_error: bool,
        is_temporary_error: bool,
    ) -> Self {
        Self {
            status_text,
            status,
            is_permanent_error,
            is_temporary_error,
        }
    }

    /// An entry that is neither permanent nor temporary.
    pub const fn benign(status_text: &'static str, status: CanonicalStatus) -> Self {
        Self::new(status_text, status, false, false)
    }
}

/// Find the first entry whose text equals `raw` after trimming, ignoring case.
pub fn lookup<'a>(table: &'a [StatusMapping], raw: &str) -> Option<&'a StatusMapping> {
    let needle = raw.trim();
    table
        .iter()
        .find(|entry| entry.status_text.eq_ignore_ascii_case(needle))
}

/// Map a non-2xx transport status code to a canonical status.
///
/// Returns `None` for 2xx codes, which pass through to the next stage.
pub fn classify_http_status(code: u16) -> Option<CanonicalStatus> {
    match code {
        200..=299 => None,
        400 => Some(CanonicalStatus::InvalidRequest),
        401 | 403 => Some(CanonicalStatus::RequestDenied),
        429 => Some(CanonicalStatus::TooManyRequests),
        503 => Some(CanonicalStatus::TemporaryError),
        _ => Some(CanonicalStatus::Error),
    }
}
