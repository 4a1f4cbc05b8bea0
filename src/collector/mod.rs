//! The collection pipeline: selection, corrections, geometry,
//! registration.

use chrono::Utc;
use tracing::info;

use crate::corrections::{CorrectionAction, CorrectionTable};
use crate::error::CollectError;
use crate::geometry::collect_shape;
use crate::models::{BoundaryDataset, CollectedBoundaries, Tier, TierMap};
use crate::registry::EntityRegistry;
use crate::select::select_records;

/// Build one tier's entity mapping from the records at `selection`,
/// applying any correction rules covering them. Iteration order is the
/// selection order; a merge rule relies on its target having been
/// registered by an earlier index and fails fast otherwise.
pub fn build_tier(
    tier: Tier,
    dataset: &BoundaryDataset,
    selection: &[usize],
    corrections: &CorrectionTable,
) -> Result<TierMap, CollectError> {
    dataset.validate()?;

    let mut registry = EntityRegistry::new(tier);

    for &index in selection {
        let geometry = collect_shape(&dataset.shapes[index])
            .map_err(|source| CollectError::Geometry { index, source })?;
        let record = &dataset.records[index];

        let rule = corrections.find(tier, index);

        if let Some(CorrectionAction::MergeInto { target, skip_rings }) =
            rule.map(|rule| &rule.action)
        {
            registry.merge_into(index, target, geometry, *skip_rings)?;
            info!("record {}: merged rings into {}", index, target);
            continue;
        }

        if geometry.rings.len() > 1 {
            info!(
                "{}: {} parts",
                record.field_or_empty(tier.name_field()),
                geometry.rings.len()
            );
        }

        let raw_name = match rule.map(|rule| &rule.action) {
            Some(CorrectionAction::Rename { name }) => name.as_str(),
            _ => record.field_or_empty(tier.name_field()),
        };
        let name = registry.resolve_name(raw_name);
        registry.insert(index, name, geometry)?;
    }

    Ok(registry.into_entities())
}

/// Datasets for all three tiers of one run.
#[derive(Debug, Clone, Default)]
pub struct TierDatasets {
    pub towns: BoundaryDataset,
    pub villages: BoundaryDataset,
    pub neighborhoods: BoundaryDataset,
    /// Names of the interchange files the datasets came from, carried
    /// into the output document for traceability.
    pub source_files: Vec<String>,
}

/// Run the full pipeline: select, correct, and register every tier for
/// the requested county and town. Tiers are independent; an empty
/// selection produces an empty mapping for that tier.
pub fn collect_boundaries(
    datasets: &TierDatasets,
    county: &str,
    town: &str,
    corrections: &CorrectionTable,
) -> Result<CollectedBoundaries, CollectError> {
    let t_selection = select_records(Tier::Town, &datasets.towns.records, county, town);
    info!("selected {} towns", t_selection.len());
    let towns = build_tier(Tier::Town, &datasets.towns, &t_selection, corrections)?;

    let v_selection = select_records(Tier::Village, &datasets.villages.records, county, town);
    info!("selected {} villages", v_selection.len());
    let villages = build_tier(Tier::Village, &datasets.villages, &v_selection, corrections)?;

    let n_selection = select_records(
        Tier::Neighborhood,
        &datasets.neighborhoods.records,
        county,
        town,
    );
    info!("selected {} neighborhoods", n_selection.len());
    let neighborhoods = build_tier(
        Tier::Neighborhood,
        &datasets.neighborhoods,
        &n_selection,
        corrections,
    )?;

    Ok(CollectedBoundaries {
        county: county.to_string(),
        town: town.to_string(),
        collected_at: Utc::now(),
        source_files: datasets.source_files.clone(),
        towns,
        villages,
        neighborhoods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrections::CorrectionRule;
    use crate::models::{AttributeRecord, RawShape};
    use geo_types::Coord;

    fn record(fields: &[(&str, &str)]) -> AttributeRecord {
        fields.iter().copied().collect()
    }

    /// Closed square rings of side 1, side-by-side starting at `origin_x`.
    fn shape(origin_x: f64, ring_count: usize) -> RawShape {
        let mut points = Vec::new();
        let mut parts = Vec::new();
        for r in 0..ring_count {
            let x = origin_x + 2.0 * r as f64;
            parts.push(points.len());
            points.extend([
                Coord { x, y: 0.0 },
                Coord { x: x + 1.0, y: 0.0 },
                Coord { x: x + 1.0, y: 1.0 },
                Coord { x, y: 1.0 },
                Coord { x, y: 0.0 },
            ]);
        }
        RawShape { points, parts }
    }

    fn town_dataset() -> BoundaryDataset {
        BoundaryDataset {
            shapes: vec![shape(0.0, 1), shape(10.0, 1), shape(20.0, 2)],
            records: vec![
                record(&[("COUNTYNAME", "屏東縣"), ("TOWNNAME", "三地門鄉")]),
                record(&[("COUNTYNAME", "屏東縣"), ("TOWNNAME", "瑪家鄉")]),
                record(&[("COUNTYNAME", "屏東縣"), ("TOWNNAME", "瑪家鄉")]),
            ],
        }
    }

    fn merge_table(index: usize, target: &str, skip_rings: usize) -> CorrectionTable {
        CorrectionTable {
            town: vec![CorrectionRule {
                index,
                dataset: "test".to_string(),
                note: String::new(),
                action: CorrectionAction::MergeInto {
                    target: target.to_string(),
                    skip_rings,
                },
            }],
            ..CorrectionTable::empty()
        }
    }

    #[test]
    fn test_merge_rule_end_to_end() {
        let dataset = town_dataset();
        let selection: Vec<usize> = (0..dataset.records.len()).collect();

        let table = merge_table(2, "瑪家鄉", 0);
        let towns = build_tier(Tier::Town, &dataset, &selection, &table).unwrap();

        assert_eq!(towns.len(), 2);
        assert_eq!(towns["三地門鄉"].rings.len(), 1);
        // 1 own ring plus both rings of the merged record.
        assert_eq!(towns["瑪家鄉"].rings.len(), 3);

        // The target keeps the anchor of its own record.
        assert!((towns["瑪家鄉"].centroid.x() - 10.5).abs() < 1e-9);
        assert!((towns["瑪家鄉"].centroid.y() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_merge_skip_drops_leading_rings() {
        let dataset = town_dataset();
        let selection: Vec<usize> = (0..dataset.records.len()).collect();

        let table = merge_table(2, "瑪家鄉", 1);
        let towns = build_tier(Tier::Town, &dataset, &selection, &table).unwrap();

        assert_eq!(towns["瑪家鄉"].rings.len(), 2);
    }

    #[test]
    fn test_duplicate_without_rule_is_fatal() {
        let dataset = town_dataset();
        let selection: Vec<usize> = (0..dataset.records.len()).collect();

        let err = build_tier(Tier::Town, &dataset, &selection, &CorrectionTable::empty())
            .unwrap_err();
        assert!(matches!(
            err,
            CollectError::DuplicateName { index: 2, name } if name == "瑪家鄉"
        ));
    }

    #[test]
    fn test_rename_rule_overrides_name() {
        let dataset = BoundaryDataset {
            shapes: vec![shape(0.0, 1)],
            records: vec![record(&[("SECT_NAME", "內湖區"), ("SDFNAME", "金瑞里2鄰")])],
        };
        let table = CorrectionTable {
            neighborhood: vec![CorrectionRule {
                index: 0,
                dataset: "test".to_string(),
                note: String::new(),
                action: CorrectionAction::Rename {
                    name: "金瑞里22鄰".to_string(),
                },
            }],
            ..CorrectionTable::empty()
        };

        let neighborhoods = build_tier(Tier::Neighborhood, &dataset, &[0], &table).unwrap();
        assert!(neighborhoods.contains_key("金瑞里22鄰"));
        assert!(!neighborhoods.contains_key("金瑞里2鄰"));
    }

    #[test]
    fn test_unnamed_records_get_distinct_placeholders() {
        let dataset = BoundaryDataset {
            shapes: vec![shape(0.0, 1), shape(10.0, 1)],
            records: vec![
                record(&[("COUNTYNAME", "臺北市"), ("TOWNNAME", "南港區"), ("VILLNAME", "")]),
                record(&[("COUNTYNAME", "臺北市"), ("TOWNNAME", "南港區"), ("VILLNAME", "")]),
            ],
        };

        let villages =
            build_tier(Tier::Village, &dataset, &[0, 1], &CorrectionTable::empty()).unwrap();
        assert!(villages.contains_key("empty_0"));
        assert!(villages.contains_key("empty_1"));
    }

    #[test]
    fn test_malformed_geometry_carries_record_index() {
        let dataset = BoundaryDataset {
            shapes: vec![RawShape {
                points: vec![
                    Coord { x: 0.0, y: 0.0 },
                    Coord { x: 1.0, y: 0.0 },
                    Coord { x: 1.0, y: 1.0 },
                ],
                parts: vec![0],
            }],
            records: vec![record(&[("COUNTYNAME", "臺北市"), ("TOWNNAME", "南港區")])],
        };

        let err =
            build_tier(Tier::Town, &dataset, &[0], &CorrectionTable::empty()).unwrap_err();
        assert!(matches!(err, CollectError::Geometry { index: 0, .. }));
    }

    #[test]
    fn test_collect_boundaries_empty_selection() {
        let datasets = TierDatasets {
            towns: town_dataset(),
            ..TierDatasets::default()
        };

        let collected =
            collect_boundaries(&datasets, "高雄市", "左營區", &CorrectionTable::empty()).unwrap();
        assert!(collected.towns.is_empty());
        assert!(collected.villages.is_empty());
        assert!(collected.neighborhoods.is_empty());
    }

    #[test]
    fn test_collect_boundaries_filters_by_town() {
        let datasets = TierDatasets {
            towns: town_dataset(),
            source_files: vec!["towns.json".to_string()],
            ..TierDatasets::default()
        };

        let table = merge_table(2, "瑪家鄉", 0);
        let collected = collect_boundaries(&datasets, "屏東縣", "三地門鄉", &table).unwrap();

        assert_eq!(collected.county, "屏東縣");
        assert_eq!(collected.town, "三地門鄉");
        assert_eq!(collected.towns.len(), 1);
        assert!(collected.towns.contains_key("三地門鄉"));
        assert_eq!(collected.source_files, vec!["towns.json".to_string()]);
    }
}
