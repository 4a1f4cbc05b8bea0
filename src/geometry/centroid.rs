//! Signed-area centroids and label-anchor selection.

use geo_types::Point;

use crate::error::{RingError, ShapeError};
use crate::geometry::ring::{assemble_rings, validate_ring, Ring};
use crate::models::RawShape;

/// Centroid and absolute enclosed area of one ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingCentroid {
    pub centroid: Point<f64>,
    pub area: f64,
}

/// Shoelace signed area and area-weighted centroid of a closed ring.
///
/// Each edge (i, i+1) contributes a signed area of
/// (x_i * y_{i+1} - x_{i+1} * y_i) / 2 and weights the centroid by its
/// term ((x_i + x_{i+1}) / 3, (y_i + y_{i+1}) / 3). The repeated closing
/// point makes the last vertex pair with the first implicitly.
pub fn ring_centroid(ring: &Ring) -> Result<RingCentroid, RingError> {
    validate_ring(ring)?;

    let mut area_sum = 0.0;
    let mut weighted_x = 0.0;
    let mut weighted_y = 0.0;

    for pair in ring.0.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let area = (a.x * b.y - b.x * a.y) / 2.0;
        area_sum += area;
        weighted_x += (a.x + b.x) / 3.0 * area;
        weighted_y += (a.y + b.y) / 3.0 * area;
    }

    // A zero total area has no defined centroid.
    if area_sum == 0.0 {
        return Err(RingError::ZeroArea);
    }

    Ok(RingCentroid {
        centroid: Point::new(weighted_x / area_sum, weighted_y / area_sum),
        area: area_sum.abs(),
    })
}

/// A shape's assembled rings plus the label anchor taken from its largest
/// ring.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub rings: Vec<Ring>,
    pub anchor: Point<f64>,
}

/// Assemble a raw shape and pick its label anchor: the centroid of the
/// ring enclosing the largest absolute area. Multi-ring shapes (a main
/// landmass plus small islets) anchor on the dominant ring rather than an
/// averaged point. All rings are kept for rendering.
pub fn collect_shape(shape: &RawShape) -> Result<ShapeGeometry, ShapeError> {
    let rings = assemble_rings(shape)?;

    let mut largest: Option<RingCentroid> = None;
    for (part, ring) in rings.iter().enumerate() {
        let computed =
            ring_centroid(ring).map_err(|source| ShapeError::Ring { part, source })?;
        match largest {
            Some(best) if computed.area < best.area => {}
            _ => largest = Some(computed),
        }
    }

    match largest {
        Some(best) => Ok(ShapeGeometry {
            rings,
            anchor: best.centroid,
        }),
        None => Err(ShapeError::NoParts),
    }
}
