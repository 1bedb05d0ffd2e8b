//! Reverse geocoding of a single tapped point.

use tracing::info;

use crate::api::{ApiRequest, Endpoint};
use crate::coordinate::Coordinate;
use crate::error::ApiError;
use crate::summary::{GeocodeResult, summarize_geocode};
use crate::traits::ApiTransport;

pub fn build_request(point: Coordinate) -> ApiRequest {
    ApiRequest::new(Endpoint::ReverseGeocode).with_param("at", point.to_query())
}

pub async fn request<T: ApiTransport>(
    transport: &T,
    point: Coordinate,
) -> Result<GeocodeResult, ApiError> {
    point.ensure_finite()?;
    let body = transport.fetch(&build_request(point)).await?;
    let result = summarize_geocode(&body)?;
    info!(at = %point, label = %result.label, "reverse geocode resolved");
    Ok(result)
}
