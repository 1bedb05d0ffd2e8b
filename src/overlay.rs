//! Renderable overlay plans.
//!
//! An [`OverlayPlan`] is everything the map host needs to draw one result:
//! a line geometry, point markers, a style and an optional camera move.
//! Plans are keyed by layer; a new plan on a layer supersedes the old one.

use serde::Serialize;

use crate::coordinate::{Coordinate, RouteRequest};
use crate::polyline::{DEFAULT_PRECISION, DecodedGeometry, decode};
use crate::summary::{GeocodeResult, RouteSummary};

pub const ROUTE_LAYER: &str = "route-layer";
pub const SNAPPED_ROUTE_LAYER: &str = "snapped-route-layer";
pub const GEOCODE_MARKER_LAYER: &str = "geocode-marker";

pub const START_TITLE: &str = "Start";
pub const END_TITLE: &str = "End";

/// Camera the demo opens on (San Francisco).
pub const INITIAL_CENTER: Coordinate = Coordinate::new(37.76218, -122.43817);
pub const INITIAL_ZOOM: f64 = 12.0;
pub const ROUTE_ZOOM: f64 = 12.0;
/// How far the inset overview map is zoomed out relative to the main map.
pub const INSET_ZOOM_OFFSET: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
}

impl Marker {
    pub fn new(coordinate: Coordinate, title: impl Into<String>) -> Self {
        Self {
            coordinate,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleHint {
    pub color_name: &'static str,
    pub width_px: f64,
}

impl StyleHint {
    pub const fn route() -> Self {
        Self {
            color_name: "systemTeal",
            width_px: 6.0,
        }
    }

    pub const fn snapped() -> Self {
        Self {
            color_name: "red",
            width_px: 2.0,
        }
    }

    /// Marker dot; `width_px` is the diameter.
    pub const fn marker() -> Self {
        Self {
            color_name: "systemTeal",
            width_px: 30.0,
        }
    }
}

/// A requested camera position. `None` fields keep the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CameraHint {
    pub center: Option<Coordinate>,
    pub zoom: Option<f64>,
}

impl CameraHint {
    pub fn initial() -> Self {
        Self {
            center: Some(INITIAL_CENTER),
            zoom: Some(INITIAL_ZOOM),
        }
    }

    pub fn centered(center: Coordinate) -> Self {
        Self {
            center: Some(center),
            zoom: None,
        }
    }

    pub fn zoomed(zoom: f64) -> Self {
        Self {
            center: None,
            zoom: Some(zoom),
        }
    }

    /// The matching camera for the inset overview map: same centre,
    /// zoomed out by [`INSET_ZOOM_OFFSET`].
    pub fn inset(&self) -> Self {
        Self {
            center: self.center,
            zoom: self.zoom.map(|zoom| zoom - INSET_ZOOM_OFFSET),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayPlan {
    pub layer_id: &'static str,
    pub geometry: DecodedGeometry,
    pub label: Option<String>,
    pub markers: Vec<Marker>,
    pub style: StyleHint,
    pub camera: Option<CameraHint>,
}

impl OverlayPlan {
    /// Route line with `Start`/`End` markers in request order.
    pub fn directions(route: &RouteRequest, summary: &RouteSummary) -> Self {
        Self {
            layer_id: ROUTE_LAYER,
            geometry: decode(summary.geometry.as_deref(), DEFAULT_PRECISION),
            label: Some(summary.label()),
            markers: vec![
                Marker::new(route.origin(), START_TITLE),
                Marker::new(route.destination(), END_TITLE),
            ],
            style: StyleHint::route(),
            camera: Some(CameraHint::zoomed(ROUTE_ZOOM)),
        }
    }

    /// Single marker titled with the resolved address.
    pub fn geocode(result: &GeocodeResult) -> Self {
        Self {
            layer_id: GEOCODE_MARKER_LAYER,
            geometry: DecodedGeometry::default(),
            label: Some(result.label.clone()),
            markers: vec![Marker::new(result.coordinate, result.label.clone())],
            style: StyleHint::marker(),
            camera: None,
        }
    }

    pub fn matching(geometry: DecodedGeometry) -> Self {
        Self {
            layer_id: SNAPPED_ROUTE_LAYER,
            geometry,
            label: None,
            markers: Vec::new(),
            style: StyleHint::snapped(),
            camera: None,
        }
    }
}
