//! Request and response types shared by all providers.

use crate::logging::LogEvent;
use crate::status::{CanonicalStatus, Rejection};
use serde::{Deserialize, Serialize};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north_east: LatLon,
    pub south_west: LatLon,
}

impl Bounds {
    pub fn new(north_east: LatLon, south_west: LatLon) -> Self {
        Self {
            north_east,
            south_west,
        }
    }
}

/// A single geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub formatted_address: String,
    pub point: LatLon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl Location {
    pub fn new(formatted_address: impl Into<String>, point: LatLon) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            point,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Input to a single provider call. Built once per lookup and never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodeRequest {
    pub address: String,
    /// Composed key for the address, see [`crate::key::compose`]
    pub address_key: String,
    pub bounds_hint: Option<Bounds>,
    pub locale: Option<String>,
    pub region: Option<String>,
}

impl GeocodeRequest {
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let address_key = crate::key::compose(&address);
        Self {
            address,
            address_key,
            ..Default::default()
        }
    }

    pub fn with_bounds_hint(mut self, bounds: Bounds) -> Self {
        self.bounds_hint = Some(bounds);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Classified outcome of one provider call.
///
/// A non-success response never carries locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub status: CanonicalStatus,
    pub locations: Vec<Location>,
    /// Event logged when the response was produced
    pub event: LogEvent,
    pub detail: Option<String>,
}

impl ProviderResponse {
    pub fn success(locations: Vec<Location>) -> Self {
        Self {
            status: CanonicalStatus::Success,
            locations,
            event: LogEvent::Success,
            detail: None,
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            status: rejection.status,
            locations: Vec::new(),
            event: rejection.event,
            detail: Some(rejection.detail),
        }
    }

    pub fn failure(status: CanonicalStatus, event: LogEvent, detail: impl Into<String>) -> Self {
        Self::rejected(Rejection::new(status, event, detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_composes_address_key() {
        let request = GeocodeRequest::new("Tiaro, Queensland, Australia");
        assert_eq!(request.address_key, "ailartsuadnalsneeuqorait");
        assert!(request.bounds_hint.is_none());
    }

    #[test]
    fn test_request_builders() {
        let bounds = Bounds::new(LatLon::new(3.0, 4.0), LatLon::new(1.0, 2.0));
        let request = GeocodeRequest::new("Paris")
            .with_locale("fr")
            .with_region("uk")
            .with_bounds_hint(bounds);

        assert_eq!(request.locale.as_deref(), Some("fr"));
        assert_eq!(request.region.as_deref(), Some("uk"));
        assert_eq!(request.bounds_hint, Some(bounds));
    }

    #[test]
    fn test_failure_response_has_no_locations() {
        let response = ProviderResponse::failure(
            CanonicalStatus::TemporaryError,
            LogEvent::ProviderTimeout,
            "timed out",
        );
        assert!(response.locations.is_empty());
        assert_eq!(response.detail.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_location_serialization_skips_missing_bounds() {
        let location = Location::new("Somewhere", LatLon::new(1.5, -2.5));
        let json = serde_json::to_value(&location).unwrap();
        assert!(json.get("bounds").is_none());
        assert_eq!(json["point"]["latitude"], 1.5);
    }
}
