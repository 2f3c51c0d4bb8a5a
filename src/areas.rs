//! Keyed area table construction and warning overlay merge.
//!
//! The base index of flood areas is built once per polling session; the
//! merge overlays the currently active warnings onto it every cycle and
//! derives a per-area risk level. Both steps build fresh maps rather than
//! mutating shared state, so a published snapshot can never be observed
//! partially merged.

use crate::ingest::ea::{AreaItem, WarningItem};
use crate::model::{AreaRecord, AreaTable, FloodArea, WarningOverlay, risk_from_severity};
use std::collections::BTreeMap;
use tracing::warn;

/// Base index of known flood areas, keyed by area code. Membership is
/// assumed stable between cycles.
pub type AreaIndex = BTreeMap<String, FloodArea>;

/// Result of one warning merge: the full table to publish plus the number
/// of warning items dropped because they referenced an unknown area.
#[derive(Debug)]
pub struct MergeOutcome {
    pub table: AreaTable,
    pub skipped: usize,
}

/// Builds the base area index from the areas resource's items.
///
/// This is a full rebuild: the returned index contains exactly the areas
/// in `items`. If two items share a notation the later one wins the key.
pub fn build_area_index(items: Vec<AreaItem>) -> AreaIndex {
    items
        .into_iter()
        .map(|item| {
            (
                item.notation.clone(),
                FloodArea {
                    notation: item.notation,
                    label: item.label,
                    description: item.description,
                },
            )
        })
        .collect()
}

/// Overlays the cycle's active warnings onto the base index and derives
/// each area's risk level.
///
/// Every area starts the cycle at baseline (no overlays, risk 0), so an
/// area whose warning lapsed since the previous cycle reverts on its own.
/// When several warnings target one area the worst severity wins,
/// independent of item order.
///
/// A warning referencing an unknown area is a data-integrity fault in the
/// upstream feed, not a reason to fail the cycle: the item is skipped,
/// counted, and logged, and no other area is affected.
pub fn apply_warnings(base: &AreaIndex, warnings: Vec<WarningItem>) -> MergeOutcome {
    let mut table: AreaTable = base
        .values()
        .map(|area| {
            (
                area.notation.clone(),
                AreaRecord {
                    name: area.notation.clone(),
                    friendly_name: area.label.clone(),
                    description: area.description.clone(),
                    current_warnings: Vec::new(),
                    risk_level: 0,
                },
            )
        })
        .collect();

    let mut skipped = 0;
    for item in warnings {
        let record = match table.get_mut(&item.flood_area_id) {
            Some(record) => record,
            None => {
                warn!(
                    "flood warning references unknown area '{}', skipping item",
                    item.flood_area_id
                );
                skipped += 1;
                continue;
            }
        };

        let derived = risk_from_severity(item.severity_level);
        record.current_warnings.push(WarningOverlay {
            message: item.message,
            severity: item.severity,
            severity_level: item.severity_level,
            time_raised: item.time_raised,
            time_message_changed: item.time_message_changed,
            time_severity_changed: item.time_severity_changed,
            tidal_alert: item.is_tidal,
        });
        // Worst severity wins; never let a milder later item lower the level.
        record.risk_level = record.risk_level.max(derived);
    }

    MergeOutcome { table, skipped }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
