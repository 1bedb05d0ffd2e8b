//! San Francisco locations and canned API responses.

use overlay_planner::coordinate::Coordinate;
use serde_json::{Value, json};

/// Polyline test vector: (38.5,-120.2), (40.7,-120.95), (43.252,-126.453).
pub const ENCODED_ROUTE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

pub const UNION_SQUARE: Coordinate = Coordinate::new(37.78800, -122.40750);
pub const FERRY_BUILDING: Coordinate = Coordinate::new(37.79550, -122.39370);
pub const DOLORES_PARK: Coordinate = Coordinate::new(37.75960, -122.42690);
pub const GOLDEN_GATE_PARK: Coordinate = Coordinate::new(37.76940, -122.48620);

pub fn route_points() -> Vec<Coordinate> {
    vec![
        Coordinate::new(38.5, -120.2),
        Coordinate::new(40.7, -120.95),
        Coordinate::new(43.252, -126.453),
    ]
}

pub fn directions_body(duration_secs: f64, distance_m: f64) -> Value {
    json!({
        "status": "Ok",
        "routes": [{
            "duration": duration_secs,
            "distance": distance_m,
            "geometry": ENCODED_ROUTE
        }]
    })
}

pub fn empty_directions_body() -> Value {
    json!({ "status": "Ok", "routes": [] })
}

pub fn geocode_item(label: &str, at: Coordinate) -> Value {
    json!({
        "title": label,
        "address": { "label": label, "countryCode": "USA" },
        "position": { "lat": at.latitude, "lng": at.longitude }
    })
}

pub fn geocode_body(items: Vec<Value>) -> Value {
    json!({ "items": items })
}

pub fn snap_body() -> Value {
    json!({
        "status": "Ok",
        "distance": 1054,
        "geometry": [ENCODED_ROUTE],
        "snappedPoints": []
    })
}
