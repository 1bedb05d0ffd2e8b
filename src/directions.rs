//! Directions between a fixed origin and destination.

use tracing::info;

use crate::api::{ApiRequest, Endpoint};
use crate::coordinate::RouteRequest;
use crate::error::ApiError;
use crate::summary::{RouteSummary, summarize_directions};
use crate::traits::ApiTransport;

pub fn build_request(route: &RouteRequest) -> ApiRequest {
    ApiRequest::new(Endpoint::Directions)
        .with_param("origin", route.origin().to_query())
        .with_param("destination", route.destination().to_query())
}

/// Requests a route and summarises its first candidate.
pub async fn request<T: ApiTransport>(
    transport: &T,
    route: &RouteRequest,
) -> Result<RouteSummary, ApiError> {
    route.ensure_finite()?;
    let body = transport.fetch(&build_request(route)).await?;
    let summary = summarize_directions(&body)?;
    info!(
        origin = %route.origin(),
        destination = %route.destination(),
        label = %summary.label(),
        "directions resolved"
    );
    Ok(summary)
}
