//! Route geometry decoding.
//!
//! Geometry arrives from the API as an encoded polyline string. Decoding
//! happens here, at the response boundary, and never fails the caller: an
//! absent or undecodable string yields an empty geometry, which downstream
//! code treats as "nothing to draw".

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::coordinate::Coordinate;

/// Precision used by the routing API's polyline fields.
pub const DEFAULT_PRECISION: u32 = 5;

/// A decoded route geometry as an ordered coordinate sequence.
///
/// Points keep the order in which they were encoded; nothing is
/// deduplicated or simplified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedGeometry {
    points: Vec<Coordinate>,
}

impl DecodedGeometry {
    /// Creates a geometry from already-decoded coordinates.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the geometry and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Decodes an encoded polyline at the given precision.
///
/// `precision` is the number of decimal digits the encoder kept, so deltas
/// are divided by `10^precision`.
pub fn decode(encoded: Option<&str>, precision: u32) -> DecodedGeometry {
    let Some(encoded) = encoded else {
        return DecodedGeometry::default();
    };

    match ::polyline::decode_polyline(encoded, precision) {
        Ok(line) => DecodedGeometry::new(
            line.0
                .into_iter()
                .map(|coord| Coordinate::new(coord.y, coord.x))
                .collect(),
        ),
        Err(err) => {
            warn!(?err, len = encoded.len(), "discarding undecodable geometry");
            DecodedGeometry::default()
        }
    }
}
