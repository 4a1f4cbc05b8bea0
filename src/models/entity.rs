//! Collected entities and the per-run output document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use geo::BoundingRect;
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::Ring;

/// One named boundary entity: every ring of its source record (plus any
/// merged in later) and the label-anchor centroid of its primary ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub rings: Vec<Ring>,
    pub centroid: Point<f64>,
}

impl Entity {
    pub fn new(name: String, rings: Vec<Ring>, centroid: Point<f64>) -> Self {
        Self {
            name,
            rings,
            centroid,
        }
    }

    /// Bounding box over all rings: (min_x, min_y, max_x, max_y).
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        let mut merged: Option<(f64, f64, f64, f64)> = None;
        for ring in &self.rings {
            if let Some(rect) = ring.bounding_rect() {
                merged = Some(match merged {
                    Some((min_x, min_y, max_x, max_y)) => (
                        min_x.min(rect.min().x),
                        min_y.min(rect.min().y),
                        max_x.max(rect.max().x),
                        max_y.max(rect.max().y),
                    ),
                    None => (rect.min().x, rect.min().y, rect.max().x, rect.max().y),
                });
            }
        }
        merged
    }
}

/// Mapping from entity name to entity for one tier.
pub type TierMap = BTreeMap<String, Entity>;

/// The document handed to the persistence and rendering collaborators:
/// one name-to-entity mapping per tier plus enough metadata to trace the
/// run. Serializes to JSON and reloads to the identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedBoundaries {
    pub county: String,
    pub town: String,
    pub collected_at: DateTime<Utc>,
    pub source_files: Vec<String>,
    pub towns: TierMap,
    pub villages: TierMap,
    pub neighborhoods: TierMap,
}

impl CollectedBoundaries {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).with_context(|| {
            format!("Failed to create output file {}", path.as_ref().display())
        })?;
        serde_json::to_writer(BufWriter::new(file), self)
            .context("Failed to serialize collected boundaries")?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open shapes file {}", path.as_ref().display()))?;
        let collected = serde_json::from_reader(BufReader::new(file))
            .context("Failed to parse collected boundaries")?;
        Ok(collected)
    }
}
