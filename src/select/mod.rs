//! Record selection for the requested county and town.

use tracing::info;

use crate::models::{AttributeRecord, Tier};

/// The only county the neighborhood source dataset covers. Its records
/// use a sectioning scheme of their own (SECT_NAME for the district,
/// LIE_NAME for the village); requests for any other county yield no
/// neighborhood records.
pub const NEIGHBORHOOD_COUNTY: &str = "臺北市";

/// Indices of the records matching the requested county and town, in
/// source order. An empty selection is valid: nothing to render.
pub fn select_records(
    tier: Tier,
    records: &[AttributeRecord],
    county: &str,
    town: &str,
) -> Vec<usize> {
    let mut selection = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let matches = match tier {
            Tier::Town | Tier::Village => {
                record.field_or_empty("COUNTYNAME") == county
                    && record.field_or_empty("TOWNNAME") == town
            }
            Tier::Neighborhood => {
                county == NEIGHBORHOOD_COUNTY && record.field_or_empty("SECT_NAME") == town
            }
        };
        if !matches {
            continue;
        }

        // The village source annotates boundary caveats in NOTE; surface
        // them so nobody misses a historical-boundary remark.
        if tier == Tier::Village {
            let note = record.field_or_empty("NOTE");
            if !note.is_empty() {
                info!(
                    "NOTE: {} {} {}: {}",
                    record.field_or_empty("COUNTYNAME"),
                    record.field_or_empty("TOWNNAME"),
                    record.field_or_empty("VILLNAME"),
                    note
                );
            }
        }

        selection.push(index);
    }

    selection
}
