//! Extraction of display summaries from raw API payloads.
//!
//! Payloads are untrusted: every field is optional and malformed pieces are
//! reported as [`ApiError::ParseError`] or skipped, never panicked on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::ApiError;

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const METERS_PER_MILE: f64 = 1609.344;

/// Duration and distance of the first route candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub duration_minutes: f64,
    pub distance_miles: f64,
    /// Encoded polyline of the route, if the API sent one.
    pub geometry: Option<String>,
}

impl RouteSummary {
    /// Human-readable label, one decimal place per figure.
    pub fn label(&self) -> String {
        format!(
            "{:.1} min {:.1} miles",
            self.duration_minutes, self.distance_miles
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    duration: Option<f64>,
    distance: Option<f64>,
    geometry: Option<String>,
}

/// Summarises the first candidate in `routes[]`. Later candidates are ignored.
pub fn summarize_directions(body: &Value) -> Result<RouteSummary, ApiError> {
    let first = body
        .get("routes")
        .and_then(Value::as_array)
        .and_then(|routes| routes.first())
        .ok_or(ApiError::EmptyResult)?;

    let route: RawRoute = serde_json::from_value(first.clone())?;
    let duration = route
        .duration
        .ok_or_else(|| ApiError::ParseError("route is missing `duration`".to_string()))?;
    let distance = route
        .distance
        .ok_or_else(|| ApiError::ParseError("route is missing `distance`".to_string()))?;

    Ok(RouteSummary {
        duration_minutes: duration / SECONDS_PER_MINUTE,
        distance_miles: distance / METERS_PER_MILE,
        geometry: route.geometry,
    })
}

/// A reverse-geocoded address and its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub label: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    address: Option<RawAddress>,
    position: Option<RawPosition>,
}

#[derive(Debug, Deserialize)]
struct RawAddress {
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    lat: Option<f64>,
    lng: Option<f64>,
}

fn parse_item(item: &Value) -> Option<GeocodeResult> {
    let raw: RawItem = serde_json::from_value(item.clone()).ok()?;
    let label = raw.address?.label?;
    let position = raw.position?;
    Some(GeocodeResult {
        label,
        coordinate: Coordinate::new(position.lat?, position.lng?),
    })
}

/// Walks `items` in order; every item that parses overwrites the previous
/// one, so the last valid item wins.
pub fn select_geocode(items: &[Value]) -> Option<GeocodeResult> {
    let mut selected = None;
    for (index, item) in items.iter().enumerate() {
        match parse_item(item) {
            Some(result) => selected = Some(result),
            None => debug!(index, "skipping incomplete geocode item"),
        }
    }
    selected
}

pub fn summarize_geocode(body: &Value) -> Result<GeocodeResult, ApiError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::ParseError("response has no `items` array".to_string()))?;

    select_geocode(items).ok_or(ApiError::EmptyResult)
}
