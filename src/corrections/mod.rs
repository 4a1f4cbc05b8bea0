//! Manual corrections for known source-dataset defects.
//!
//! The table is declarative data bundled with the crate (`rules.toml`),
//! not branching in the pipeline: each rule names the tier and raw record
//! index it covers and the single action to take there. Any conflict the
//! table does not cover fails fast so a human reviews the data and adds a
//! rule, instead of a heuristic resolving it silently.

use serde::Deserialize;

use crate::error::CollectError;
use crate::models::Tier;

/// What to do with a covered record instead of the normal resolution path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum CorrectionAction {
    /// Discard the record's own name and anchor; append its rings, minus
    /// the first `skip_rings`, to an already-registered entity.
    MergeInto {
        target: String,
        #[serde(default)]
        skip_rings: usize,
    },
    /// Override the resolved name before registration. Used when one
    /// specific record carries a transcription error in its name column.
    Rename { name: String },
}

/// One exception, keyed to an exact record of a named source dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrectionRule {
    pub index: usize,
    pub dataset: String,
    #[serde(default)]
    pub note: String,
    #[serde(flatten)]
    pub action: CorrectionAction,
}

/// Per-tier rule lists.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CorrectionTable {
    #[serde(default)]
    pub town: Vec<CorrectionRule>,
    #[serde(default)]
    pub village: Vec<CorrectionRule>,
    #[serde(default)]
    pub neighborhood: Vec<CorrectionRule>,
}

impl CorrectionTable {
    /// The table shipped with the crate. Changing it is a code change,
    /// versioned together with the datasets it cites.
    pub fn bundled() -> Result<Self, CollectError> {
        let table = toml::from_str(include_str!("rules.toml"))?;
        Ok(table)
    }

    /// A table with no rules; every record takes the normal path.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rules(&self, tier: Tier) -> &[CorrectionRule] {
        match tier {
            Tier::Town => &self.town,
            Tier::Village => &self.village,
            Tier::Neighborhood => &self.neighborhood,
        }
    }

    /// The rule covering a raw record index, if any.
    pub fn find(&self, tier: Tier, index: usize) -> Option<&CorrectionRule> {
        self.rules(tier).iter().find(|rule| rule.index == index)
    }
}
