//! Splitting raw shapes into closed rings.

use geo_types::LineString;

use crate::error::{RingError, ShapeError};
use crate::models::RawShape;

/// One closed boundary loop of a polygon.
pub type Ring = LineString<f64>;

/// Check the closed-ring invariant: at least 3 points, first equals last.
pub fn validate_ring(ring: &Ring) -> Result<(), RingError> {
    let coords = &ring.0;
    if coords.len() < 3 {
        return Err(RingError::TooFewPoints {
            count: coords.len(),
        });
    }
    if coords.first() != coords.last() {
        return Err(RingError::Unclosed);
    }
    Ok(())
}

/// Split a raw shape's flat point sequence into rings, one per consecutive
/// pair of part-start offsets, with an implicit end offset at the sequence
/// length. Every assembled ring must already be closed in the source data;
/// an open ring means the upstream export is corrupt, not recoverable.
pub fn assemble_rings(shape: &RawShape) -> Result<Vec<Ring>, ShapeError> {
    if shape.parts.is_empty() {
        return Err(ShapeError::NoParts);
    }

    let points = shape.points.len();
    let mut rings = Vec::with_capacity(shape.parts.len());

    for part in 0..shape.parts.len() {
        let start = shape.parts[part];
        let end = shape.parts.get(part + 1).copied().unwrap_or(points);
        if start >= end || end > points {
            return Err(ShapeError::BadPartOffsets { points });
        }

        let ring = Ring::new(shape.points[start..end].to_vec());
        validate_ring(&ring).map_err(|source| ShapeError::Ring { part, source })?;
        rings.push(ring);
    }

    Ok(rings)
}
