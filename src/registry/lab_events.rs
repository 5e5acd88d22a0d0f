//! Lab events table registry

use arrow::array::Array;
use arrow::record_batch::RecordBatch;

use super::TableRegistry;
use crate::error::Result;
use crate::models::LabEvent;
use crate::models::adapters::{f64_column, i64_column, opt_string, require_i64, string_column};

/// Logical name of the lab events table
pub const TABLE: &str = "lab_events";

/// Registry for the lab events table
pub struct LabEventsRegistry;

impl TableRegistry for LabEventsRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "labevents.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["subject_id", "itemid", "value", "valuenum"]
    }
}

/// Deserialize one record batch into lab events
///
/// The raw `value` and numeric `valuenum` fields are kept independently
/// nullable; the lab report's missingness metric depends on the raw field
/// alone.
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<LabEvent>> {
    let subject_ids = i64_column(batch, TABLE, "subject_id")?;
    let item_ids = i64_column(batch, TABLE, "itemid")?;
    let values = string_column(batch, TABLE, "value")?;
    let value_nums = f64_column(batch, TABLE, "valuenum")?;

    let mut events = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let value_num = if value_nums.is_null(row) {
            None
        } else {
            Some(value_nums.value(row))
        };
        events.push(LabEvent::new(
            require_i64(&subject_ids, TABLE, "subject_id", row)?,
            require_i64(&item_ids, TABLE, "itemid", row)?,
            opt_string(&values, row),
            value_num,
        ));
    }
    Ok(events)
}

/// Deserialize all record batches of the lab events table
pub fn deserialize(batches: &[RecordBatch]) -> Result<Vec<LabEvent>> {
    let mut events = Vec::new();
    for batch in batches {
        events.extend(deserialize_batch(batch)?);
    }
    Ok(events)
}
