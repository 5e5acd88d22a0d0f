//! Lab item dictionary table registry

use arrow::record_batch::RecordBatch;
use log::warn;

use super::TableRegistry;
use crate::error::Result;
use crate::models::LabItemDictionary;
use crate::models::adapters::{i64_column, opt_string, require_i64, string_column};

/// Logical name of the lab item dictionary table
pub const TABLE: &str = "lab_items";

/// Registry for the lab item dictionary table
pub struct LabItemsRegistry;

impl TableRegistry for LabItemsRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "d_labitems.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["itemid", "label"]
    }
}

/// Deserialize the dictionary batches into a lookup
pub fn deserialize(batches: &[RecordBatch]) -> Result<LabItemDictionary> {
    let mut rows = Vec::new();
    for batch in batches {
        let item_ids = i64_column(batch, TABLE, "itemid")?;
        let labels = string_column(batch, TABLE, "label")?;

        for row in 0..batch.num_rows() {
            let Some(label) = opt_string(&labels, row) else {
                warn!("skipping {TABLE} row {row} with null label");
                continue;
            };
            rows.push((require_i64(&item_ids, TABLE, "itemid", row)?, label));
        }
    }
    Ok(LabItemDictionary::from_rows(rows))
}
