//! overlay-planner
//!
//! Turns routing and geocoding API responses into overlay plans that a map
//! host can draw: route lines, snapped paths and address markers.

pub mod api;
pub mod config;
pub mod coordinate;
pub mod directions;
pub mod error;
pub mod geocode;
pub mod matching;
pub mod orchestrator;
pub mod overlay;
pub mod polyline;
pub mod summary;
pub mod traits;
