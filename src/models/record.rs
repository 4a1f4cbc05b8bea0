//! Raw boundary records as supplied by the parsed-shapefile interchange.

use std::collections::HashMap;

use geo_types::Coord;
use serde::{Deserialize, Serialize};

use crate::error::CollectError;

/// The three administrative levels processed per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Town,
    Village,
    Neighborhood,
}

impl Tier {
    /// The attribute column holding this tier's entity name.
    pub fn name_field(self) -> &'static str {
        match self {
            Tier::Town => "TOWNNAME",
            Tier::Village => "VILLNAME",
            Tier::Neighborhood => "SDFNAME",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Town => "town",
            Tier::Village => "village",
            Tier::Neighborhood => "neighborhood",
        }
    }
}

/// One record's attribute row: DBF-style column name mapped to its value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRecord {
    pub fields: HashMap<String, String>,
}

impl AttributeRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Column value, treating an absent column like a blank one. DBF rows
    /// always carry every column, but the value may be empty.
    pub fn field_or_empty(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One record's raw geometry: a flat point sequence and the starting
/// offset of each part (ring) within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawShape {
    pub points: Vec<Coord<f64>>,
    pub parts: Vec<usize>,
}

/// An index-aligned batch of shapes and attribute records for one tier,
/// possibly concatenated from several source files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDataset {
    pub shapes: Vec<RawShape>,
    pub records: Vec<AttributeRecord>,
}

impl BoundaryDataset {
    /// Shapes and records pair 1:1 by index; a length mismatch means the
    /// interchange data is corrupt.
    pub fn validate(&self) -> Result<(), CollectError> {
        if self.shapes.len() != self.records.len() {
            return Err(CollectError::RecordMismatch {
                shapes: self.shapes.len(),
                records: self.records.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another dataset, keeping index alignment. Record indices in
    /// correction rules refer to positions in the concatenation.
    pub fn extend(&mut self, other: BoundaryDataset) {
        self.shapes.extend(other.shapes);
        self.records.extend(other.records);
    }
}
