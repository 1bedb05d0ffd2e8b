//! Geographic coordinate value type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A WGS84 latitude/longitude pair.
///
/// Values are passed through as given: out-of-range latitudes or longitudes
/// are not clamped or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Renders the coordinate as the `lat,lng` pair the API expects.
    pub fn to_query(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Rejects NaN or infinite components before they reach a query string.
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(ApiError::InvalidRequest(format!(
                "coordinate {self} is not finite"
            )))
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self { latitude, longitude }
    }
}

/// An ordered sequence of route points: origin, optional vias, destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    points: Vec<Coordinate>,
}

impl RouteRequest {
    /// Directions take exactly one origin and one destination.
    pub fn directions(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            points: vec![origin, destination],
        }
    }

    /// Ordered probe points for matching; at least two are required.
    pub fn probes(points: Vec<Coordinate>) -> Result<Self, ApiError> {
        if points.len() < 2 {
            return Err(ApiError::InvalidRequest(format!(
                "matching needs at least 2 probe points, got {}",
                points.len()
            )));
        }
        let route = Self { points };
        route.ensure_finite()?;
        Ok(route)
    }

    /// Fails with `InvalidRequest` if any point is NaN or infinite.
    pub fn ensure_finite(&self) -> Result<(), ApiError> {
        self.points.iter().try_for_each(Coordinate::ensure_finite)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn origin(&self) -> Coordinate {
        self.points[0]
    }

    pub fn destination(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }
}
