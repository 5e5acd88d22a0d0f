//! ICD dictionary table registry

use arrow::record_batch::RecordBatch;
use log::warn;

use super::TableRegistry;
use crate::error::Result;
use crate::models::adapters::{i64_column, opt_string, require_i64, string_column};
use crate::models::{IcdDictionary, IcdVersion};

/// Logical name of the ICD dictionary table
pub const TABLE: &str = "icd_dictionary";

/// Registry for the ICD dictionary table
pub struct IcdDictionaryRegistry;

impl TableRegistry for IcdDictionaryRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "d_icd_diagnoses.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["icd_code", "icd_version", "long_title"]
    }
}

/// Deserialize the dictionary batches into a lookup
///
/// Dimension rows without a code or title carry no information; they are
/// skipped with a warning instead of failing the load.
pub fn deserialize(batches: &[RecordBatch]) -> Result<IcdDictionary> {
    let mut rows = Vec::new();
    for batch in batches {
        let codes = string_column(batch, TABLE, "icd_code")?;
        let versions = i64_column(batch, TABLE, "icd_version")?;
        let titles = string_column(batch, TABLE, "long_title")?;

        for row in 0..batch.num_rows() {
            let (Some(code), Some(title)) = (opt_string(&codes, row), opt_string(&titles, row))
            else {
                warn!("skipping {TABLE} row {row} with null code or title");
                continue;
            };
            let version = IcdVersion::from(require_i64(&versions, TABLE, "icd_version", row)?);
            rows.push((code, version, title));
        }
    }
    Ok(IcdDictionary::from_rows(rows))
}
