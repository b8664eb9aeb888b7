//! Bing Maps Locations API adapter.

use super::{Bounds, GeocodeProvider, GeocodeRequest, LatLon, Location, ProviderId, ProviderResponse};
use crate::logging::LogEvent;
use crate::status::pipeline::{self, Rejection, StageResult};
use crate::status::{CanonicalStatus, StatusMapping};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

pub const BING_ENDPOINT: &str = "https://dev.virtualearth.net/REST/v1/Locations";

/// Bing answers with this header instead of HTTP 429 when it wants callers to back off.
pub const BACKOFF_HEADER: &str = "X-MS-BM-WS-INFO";

const MAX_RESULTS: u32 = 25;

/// Bing's `statusDescription` vocabulary, first match wins.
pub static BING_STATUS_TABLE: &[StatusMapping] = &[
    StatusMapping::benign("OK", CanonicalStatus::Success),
    StatusMapping::new("Unauthorized", CanonicalStatus::RequestDenied, true, false),
    StatusMapping::new("Service Unavailable", CanonicalStatus::TemporaryError, false, true),
    StatusMapping::new("Unparseable error", CanonicalStatus::Error, true, true),
    StatusMapping::benign("ZERO_RESULTS", CanonicalStatus::ZeroResults),
];

/// Bing Maps adapter.
///
/// - `c`, `userRegion` and `userMapView` carry the request hints
/// - Backoff arrives out-of-band through [`BACKOFF_HEADER`]
/// - Bounding boxes are `[south, west, north, east]`
pub struct BingProvider {
    endpoint: String,
    api_key: String,
    client: Arc<Client>,
}

impl BingProvider {
    pub fn new(api_key: String, client: Arc<Client>) -> Self {
        Self {
            endpoint: BING_ENDPOINT.to_string(),
            api_key,
            client,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query_params(&self, request: &GeocodeRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", request.address.clone()),
            ("key", self.api_key.clone()),
            ("maxResults", MAX_RESULTS.to_string()),
        ];

        if let Some(locale) = request.locale.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("c", locale.to_string()));
        }
        if let Some(region) = request.region.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("userRegion", region.to_string()));
        }
        if let Some(bounds) = &request.bounds_hint {
            params.push((
                "userMapView",
                format!(
                    "{},{},{},{}",
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

        let backoff = response
            .headers()
            .get_all(BACKOFF_HEADER)
            .iter()
            .any(|v| v.to_str().map(|s| s.trim() == "1").unwrap_or(false));
        pipeline::check_backoff_signal(backoff, BACKOFF_HEADER)?;

        let body = response.text().await.map_err(Rejection::transport)?;
        tracing::trace!(
            event_id = LogEvent::ProviderResponse.code(),
            event = %LogEvent::ProviderResponse,
            provider = "bing",
            body = %body,
            "provider response"
        );

        let root: BingRoot = pipeline::deserialize_payload(&body)?;

        if !root.error_details.is_empty() {
            return Err(Rejection::new(
                CanonicalStatus::Error,
                LogEvent::ProviderError,
                root.error_details.join(", "),
            ));
        }

        pipeline::classify_content_status(
            BING_STATUS_TABLE,
            root.status_description.as_deref(),
            None,
        )?;

        let resource_sets = pipeline::require_results(root.resource_sets)?;
        if resource_sets.iter().map(|rs| rs.estimated_total).sum::<u64>() == 0 {
            return Err(Rejection::new(
                CanonicalStatus::ZeroResults,
                LogEvent::ZeroResults,
                "estimated total is zero",
            ));
        }

        validate_geometry(resource_sets)
    }
}

fn validate_geometry(resource_sets: Vec<BingResourceSet>) -> StageResult<Vec<Location>> {
    let mut locations = Vec::new();

    for resource in resource_sets.into_iter().flat_map(|rs| rs.resources) {
        let Some(bounds) = resource.bbox.as_deref().and_then(bbox_to_bounds) else {
            return Err(Rejection::new(
                CanonicalStatus::PermanentError,
                LogEvent::MissingBounds,
                "resource without bounding box",
            ));
        };
        if resource.geocode_points.is_empty() {
            return Err(Rejection::new(
                CanonicalStatus::PermanentError,
                LogEvent::MissingGeometry,
                "resource without geocode points",
            ));
        }
        let Some(point) = resource.point.as_ref().and_then(BingPoint::lat_lon) else {
            return Err(Rejection::new(
                CanonicalStatus::PermanentError,
                LogEvent::MissingLocation,
                "resource without point",
            ));
        };

        let formatted = resource
            .address
            .and_then(|a| a.formatted_address)
            .or(resource.name)
            .unwrap_or_default();
        locations.push(Location::new(formatted, point).with_bounds(bounds));
    }

    if locations.is_empty() {
        return Err(Rejection::new(
            CanonicalStatus::ZeroResults,
            LogEvent::ZeroResults,
            "resource sets contain no resources",
        ));
    }

    Ok(locations)
}

fn bbox_to_bounds(bbox: &[f64]) -> Option<Bounds> {
    match bbox {
        [south, west, north, east] => Some(Bounds::new(
            LatLon::new(*north, *east),
            LatLon::new(*south, *west),
        )),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingRoot {
    status_description: Option<String>,
    #[serde(default)]
    error_details: Vec<String>,
    resource_sets: Option<Vec<BingResourceSet>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResourceSet {
    #[serde(default)]
    estimated_total: u64,
    #[serde(default)]
    resources: Vec<BingResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResource {
    name: Option<String>,
    address: Option<BingAddress>,
    bbox: Option<Vec<f64>>,
    #[serde(default)]
    geocode_points: Vec<BingPoint>,
    point: Option<BingPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingAddress {
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BingPoint {
    #[serde(default)]
    coordinates: Vec<f64>,
}

impl BingPoint {
    fn lat_lon(&self) -> Option<LatLon> {
        match self.coordinates.as_slice() {
            [lat, lon] => Some(LatLon::new(*lat, *lon)),
            _ => None,
        }
    }
}

#[async_trait]
impl GeocodeProvider for BingProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Bing
    }

    async fn geocode(&self, request: &GeocodeRequest) -> ProviderResponse {
        let outcome = self.run_pipeline(request).await;
        pipeline::conclude(self.id(), &request.address, outcome)
    }
}
