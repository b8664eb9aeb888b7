//! Aggregate lookup outcome.

use crate::provider::{Location, ProviderId};
use crate::status::CanonicalStatus;
use serde::Serialize;
use std::fmt;

/// Coarse outcome of a whole lookup across every attempted provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Geocoded,
    ZeroResults,
    PermanentGeocodeError,
    TemporaryGeocodeError,
    /// Providers disagreed, or none was ever eligible
    MultipleIssues,
}

impl LookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geocoded => "geocoded",
            Self::ZeroResults => "zero_results",
            Self::PermanentGeocodeError => "permanent_geocode_error",
            Self::TemporaryGeocodeError => "temporary_geocode_error",
            Self::MultipleIssues => "multiple_issues",
        }
    }

    /// Derive the aggregate from every attempt of a lookup.
    ///
    /// Rules are evaluated top to bottom and the first match wins.
    pub fn summarise(attempts: &[Attempt]) -> Self {
        if attempts.is_empty() {
            return Self::MultipleIssues;
        }

        let all = |f: fn(CanonicalStatus) -> bool| attempts.iter().all(|a| f(a.status));
        let any = |f: fn(CanonicalStatus) -> bool| attempts.iter().any(|a| f(a.status));

        if any(|s| s == CanonicalStatus::Success) {
            Self::Geocoded
        } else if all(|s| s == CanonicalStatus::ZeroResults) {
            Self::ZeroResults
        } else if all(|s| {
            matches!(
                s,
                CanonicalStatus::Error
                    | CanonicalStatus::PermanentError
                    | CanonicalStatus::StatusEmpty
                    | CanonicalStatus::InvalidRequest
            )
        }) {
            Self::PermanentGeocodeError
        } else if any(|s| {
            matches!(
                s,
                CanonicalStatus::RequestDenied | CanonicalStatus::TooManyRequests
            )
        }) {
            Self::TemporaryGeocodeError
        } else {
            Self::MultipleIssues
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider call made during a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub provider: ProviderId,
    pub status: CanonicalStatus,
}

/// What the caller gets back from a lookup. Always produced, never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Provider that answered successfully, `None` when nobody did
    pub provider: Option<ProviderId>,
    pub status: LookupStatus,
    pub locations: Vec<Location>,
    /// Every provider call in the order it was made
    pub attempts: Vec<Attempt>,
    pub address_key: String,
}

impl AggregateResult {
    /// Winning provider name, or `"none"`.
    pub fn provider_name(&self) -> &'static str {
        self.provider.map(|p| p.as_str()).unwrap_or("none")
    }

    pub fn is_geocoded(&self) -> bool {
        self.status == LookupStatus::Geocoded
    }
}
