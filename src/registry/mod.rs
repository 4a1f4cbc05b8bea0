//! Per-tier entity registries.
//!
//! A registry owns the name-to-entity mapping for one tier while it is
//! being built, together with the placeholder counter for unnamed
//! records. Counters live here rather than in ambient state so several
//! tiers or runs never interfere.

use tracing::info;

use crate::error::CollectError;
use crate::geometry::ShapeGeometry;
use crate::models::{Entity, Tier, TierMap};

pub struct EntityRegistry {
    tier: Tier,
    entities: TierMap,
    placeholder_count: usize,
}

impl EntityRegistry {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            entities: TierMap::new(),
            placeholder_count: 0,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Canonical entity name for a raw name field. Blank names get a
    /// sequential placeholder unique within the tier.
    pub fn resolve_name(&mut self, raw: &str) -> String {
        if raw.is_empty() {
            let name = format!("empty_{}", self.placeholder_count);
            self.placeholder_count += 1;
            info!("renamed empty {} name into {}", self.tier.label(), name);
            name
        } else {
            raw.to_string()
        }
    }

    /// Register a new entity. A name collision outside the correction
    /// table signals an undiscovered source defect and aborts the run.
    pub fn insert(
        &mut self,
        index: usize,
        name: String,
        geometry: ShapeGeometry,
    ) -> Result<(), CollectError> {
        if self.entities.contains_key(&name) {
            return Err(CollectError::DuplicateName { index, name });
        }
        self.entities
            .insert(name.clone(), Entity::new(name, geometry.rings, geometry.anchor));
        Ok(())
    }

    /// Append a merged record's rings to an existing entity. The target's
    /// centroid and earlier rings stay untouched; the merged record's own
    /// anchor is discarded.
    pub fn merge_into(
        &mut self,
        index: usize,
        target: &str,
        geometry: ShapeGeometry,
        skip_rings: usize,
    ) -> Result<(), CollectError> {
        let entity = self.entities.get_mut(target).ok_or_else(|| {
            CollectError::MergeTargetMissing {
                index,
                target: target.to_string(),
            }
        })?;

        let count = geometry.rings.len();
        if skip_rings >= count {
            return Err(CollectError::MergeSkipOutOfRange {
                index,
                skip: skip_rings,
                count,
            });
        }

        entity.rings.extend(geometry.rings.into_iter().skip(skip_rings));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn into_entities(self) -> TierMap {
        self.entities
    }
}
