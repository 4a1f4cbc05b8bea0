//! Camphor - administrative boundary collection for electoral map rendering.
//!
//! Turns parsed MOI boundary records into per-tier mappings from entity
//! name to closed polygon rings and a label-anchor centroid.

pub mod collector;
pub mod corrections;
pub mod error;
pub mod geometry;
pub mod models;
pub mod registry;
pub mod select;

pub use collector::{build_tier, collect_boundaries, TierDatasets};
pub use error::CollectError;
pub use models::{CollectedBoundaries, Entity, Tier, TierMap};
