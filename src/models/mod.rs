//! Shared data types for boundary collection.

mod entity;
mod record;

pub use entity::{CollectedBoundaries, Entity, TierMap};
pub use record::{AttributeRecord, BoundaryDataset, RawShape, Tier};
