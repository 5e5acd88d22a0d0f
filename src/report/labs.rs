//! Lab statistics report
//!
//! Groups lab events by item label and reports the mean numeric value and
//! the missingness of the raw result field.
//!
//! Missingness is defined on the raw `value` field, NOT on `valuenum`: a
//! non-numeric result such as "TRACE" has a raw value but no numeric value
//! and does not count as missing. The distinction is deliberate and pinned
//! by tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{LabEvent, LabItemDictionary};

/// Per-label lab statistics row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabLabelStats {
    /// Item label from the lab dictionary, or an `itemid N` fallback
    pub label: String,
    /// Total events observed for the label
    pub observations: u64,
    /// Mean of the numeric values; NaN when no event has one
    pub mean_value_num: f64,
    /// Share of events whose raw value is null, in percent
    pub missing_pct: f64,
}

#[derive(Default)]
struct LabelAccumulator {
    rows: u64,
    missing_raw: u64,
    numeric_sum: f64,
    numeric_rows: u64,
}

/// Mean numeric value and raw-value missingness per lab item label
///
/// Events whose item is absent from the dictionary are kept under an
/// `itemid N` fallback label rather than dropped. Rows are ordered by label
/// ascending.
#[must_use]
pub fn lab_statistics(events: &[LabEvent], items: &LabItemDictionary) -> Vec<LabLabelStats> {
    let mut by_label: BTreeMap<String, LabelAccumulator> = BTreeMap::new();

    for event in events {
        let label = items
            .label(event.item_id)
            .map_or_else(|| format!("itemid {}", event.item_id), str::to_string);
        let acc = by_label.entry(label).or_default();

        acc.rows += 1;
        if event.value.is_none() {
            acc.missing_raw += 1;
        }
        if let Some(numeric) = event.value_num {
            acc.numeric_sum += numeric;
            acc.numeric_rows += 1;
        }
    }

    by_label
        .into_iter()
        .map(|(label, acc)| LabLabelStats {
            label,
            observations: acc.rows,
            mean_value_num: if acc.numeric_rows == 0 {
                f64::NAN
            } else {
                acc.numeric_sum / acc.numeric_rows as f64
            },
            missing_pct: if acc.rows == 0 {
                0.0
            } else {
                acc.missing_raw as f64 / acc.rows as f64 * 100.0
            },
        })
        .collect()
}
