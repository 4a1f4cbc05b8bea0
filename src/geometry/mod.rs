//! Ring assembly and centroid computation for boundary shapes.

mod centroid;
mod ring;

pub use centroid::{collect_shape, ring_centroid, RingCentroid, ShapeGeometry};
pub use ring::{assemble_rings, validate_ring, Ring};
