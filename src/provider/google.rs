//! Google geocoding API adapter.

use super::{Bounds, GeocodeProvider, GeocodeRequest, LatLon, Location, ProviderId, ProviderResponse};
use crate::logging::LogEvent;
use crate::status::pipeline::{self, Rejection, StageResult};
use crate::status::{CanonicalStatus, StatusMapping};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

pub const GOOGLE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google's `status` vocabulary, first match wins.
pub static GOOGLE_STATUS_TABLE: &[StatusMapping] = &[
    StatusMapping::benign("OK", CanonicalStatus::Success),
    StatusMapping::new("INVALID_REQUEST", CanonicalStatus::PermanentError, true, false),
    StatusMapping::new("OVER_DAILY_LIMIT", CanonicalStatus::TooManyRequests, false, true),
    StatusMapping::new("OVER_QUERY_LIMIT", CanonicalStatus::TooManyRequests, false, true),
    StatusMapping::new("REQUEST_DENIED", CanonicalStatus::PermanentError, true, false),
    StatusMapping::new("UNKNOWN_ERROR", CanonicalStatus::TemporaryError, false, true),
    StatusMapping::benign("ZERO_RESULTS", CanonicalStatus::ZeroResults),
    StatusMapping::new("Unparseable error", CanonicalStatus::PermanentError, true, false),
    StatusMapping::new("Content status empty", CanonicalStatus::StatusEmpty, true, false),
];

/// Google geocoding adapter.
///
/// - Single GET against the geocode JSON endpoint with the key as a query parameter
/// - `language`, `region` and `bounds` carry the request hints
/// - Result bounds fall back to the viewport when Google omits them
pub struct GoogleProvider {
    endpoint: String,
    api_key: String,
    client: Arc<Client>,
}

impl GoogleProvider {
    pub fn new(api_key: String, client: Arc<Client>) -> Self {
        Self {
            endpoint: GOOGLE_ENDPOINT.to_string(),
            api_key,
            client,
        }
    }

    /// Point the adapter at a different endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters for a request, in wire order.
    pub fn query_params(&self, request: &GeocodeRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("address", request.address.clone()),
            ("key", self.api_key.clone()),
            ("sensor", "false".to_string()),
        ];

        if let Some(locale) = request.locale.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("language", locale.to_string()));
        }
        if let Some(region) = request.region.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("region", region.to_string()));
        }
        if let Some(bounds) = &request.bounds_hint {
            params.push((
                "bounds",
                format!(
                    "{},{}|{},{}",
                    bounds.south_west.latitude,
                    bounds.south_west.longitude,
                    bounds.north_east.latitude,
                    bounds.north_east.longitude
                ),
            ));
        }

        params
    }

    async fn run_pipeline(&self, request: &GeocodeRequest) -> StageResult<Vec<Location>> {
        pipeline::validate_input(&request.address)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(Rejection::transport)?;

        pipeline::validate_http_status(response.status().as_u16())?;

        let body = response.text().await.map_err(Rejection::transport)?;
        tracing::trace!(
            event_id = LogEvent::ProviderResponse.code(),
            event = %LogEvent::ProviderResponse,
            provider = "google",
            body = %body,
            "provider response"
        );

        let root: GoogleRoot = pipeline::deserialize_payload(&body)?;
        pipeline::classify_content_status(
            GOOGLE_STATUS_TABLE,
            root.status.as_deref(),
            root.error_message.as_deref(),
        )?;

        let results = pipeline::require_results(root.results)?;
        validate_geometry(results)
    }
}

/// Check every result has usable geometry and convert it.
fn validate_geometry(results: Vec<GoogleResult>) -> StageResult<Vec<Location>> {
    let defect = |event: LogEvent, detail: &str| {
        Rejection::new(CanonicalStatus::PermanentError, event, detail)
    };

    let geometries = || results.iter().filter_map(|r| r.geometry.as_ref());

    if results.iter().any(|r| r.geometry.is_none()) {
        return Err(defect(LogEvent::MissingGeometry, "result without geometry"));
    }
    if geometries().any(|g| g.bounds.is_none() && g.viewport.is_none()) {
        return Err(defect(LogEvent::MissingBounds, "result without bounds or viewport"));
    }
    if geometries().any(|g| g.location.is_none()) {
        return Err(defect(LogEvent::MissingLocation, "result without location"));
    }

    results
        .into_iter()
        .map(|result| {
            let geometry = result.geometry?;
            let bounds = geometry.bounds.or(geometry.viewport)?;
            let point = geometry.location?;
            Some(
                Location::new(result.formatted_address.unwrap_or_default(), point.into())
                    .with_bounds(bounds.into()),
            )
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| defect(LogEvent::MissingGeometry, "result without geometry"))
}

#[derive(Debug, Deserialize)]
struct GoogleRoot {
    status: Option<String>,
    error_message: Option<String>,
    results: Option<Vec<GoogleResult>>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: Option<String>,
    geometry: Option<GoogleGeometry>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: Option<GoogleLatLng>,
    bounds: Option<GoogleBox>,
    viewport: Option<GoogleBox>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct GoogleBox {
    northeast: GoogleLatLng,
    southwest: GoogleLatLng,
}

impl From<GoogleLatLng> for LatLon {
    fn from(p: GoogleLatLng) -> Self {
        LatLon::new(p.lat, p.lng)
    }
}

impl From<GoogleBox> for Bounds {
    fn from(b: GoogleBox) -> Self {
        Bounds::new(b.northeast.into(), b.southwest.into())
    }
}

#[async_trait]
impl GeocodeProvider for GoogleProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Google
    }

    async fn geocode(&self, request: &GeocodeRequest) -> ProviderResponse {
        let outcome = self.run_pipeline(request).await;
        pipeline::conclude(self.id(), &request.address, outcome)
    }
}
