//! Snapping ordered probe points onto the road network.

use serde_json::Value;
use tracing::info;

use crate::api::{ApiRequest, Endpoint};
use crate::coordinate::{Coordinate, RouteRequest};
use crate::error::ApiError;
use crate::polyline::{DEFAULT_PRECISION, DecodedGeometry, decode};
use crate::traits::ApiTransport;

pub fn build_request(probes: &RouteRequest) -> ApiRequest {
    let path = probes
        .points()
        .iter()
        .map(|point| point.to_query())
        .collect::<Vec<_>>()
        .join("|");
    ApiRequest::new(Endpoint::SnapToRoads).with_param("path", path)
}

/// Returns the first encoded geometry in `geometry[]`.
pub fn snapped_geometry(body: &Value) -> Result<&str, ApiError> {
    match body
        .get("geometry")
        .and_then(Value::as_array)
        .and_then(|geometries| geometries.first())
    {
        Some(Value::String(encoded)) => Ok(encoded.as_str()),
        Some(other) => Err(ApiError::ParseError(format!(
            "snapped geometry is not a string: {other}"
        ))),
        None => Err(ApiError::EmptyResult),
    }
}

/// Snaps `probes` and decodes the resulting path.
///
/// Fails with [`ApiError::InvalidRequest`] before any HTTP call when fewer
/// than two probes are given.
pub async fn request<T: ApiTransport>(
    transport: &T,
    probes: Vec<Coordinate>,
) -> Result<DecodedGeometry, ApiError> {
    let probes = RouteRequest::probes(probes)?;
    let body = transport.fetch(&build_request(&probes)).await?;
    let geometry = decode(Some(snapped_geometry(&body)?), DEFAULT_PRECISION);
    info!(
        probes = probes.points().len(),
        points = geometry.len(),
        "matching resolved"
    );
    Ok(geometry)
}
