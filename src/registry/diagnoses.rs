//! Diagnoses table registry

use arrow::record_batch::RecordBatch;

use super::TableRegistry;
use crate::error::{Error, Result};
use crate::models::adapters::{i64_column, opt_string, require_i64, string_column};
use crate::models::{Diagnosis, IcdVersion};

/// Logical name of the diagnoses table
pub const TABLE: &str = "diagnoses";

/// Registry for the diagnoses table
pub struct DiagnosesRegistry;

impl TableRegistry for DiagnosesRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "diagnoses_icd.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["subject_id", "hadm_id", "icd_code", "icd_version"]
    }
}

/// Deserialize one record batch into diagnoses
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<Diagnosis>> {
    let subject_ids = i64_column(batch, TABLE, "subject_id")?;
    let hadm_ids = i64_column(batch, TABLE, "hadm_id")?;
    let codes = string_column(batch, TABLE, "icd_code")?;
    let versions = i64_column(batch, TABLE, "icd_version")?;

    let mut diagnoses = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let code = opt_string(&codes, row).ok_or_else(|| {
            Error::schema(TABLE, format!("column 'icd_code' has a null value at row {row}"))
        })?;
        let version = IcdVersion::from(require_i64(&versions, TABLE, "icd_version", row)?);
        diagnoses.push(Diagnosis::new(
            require_i64(&subject_ids, TABLE, "subject_id", row)?,
            require_i64(&hadm_ids, TABLE, "hadm_id", row)?,
            code,
            version,
        ));
    }
    Ok(diagnoses)
}

/// Deserialize all record batches of the diagnoses table
pub fn deserialize(batches: &[RecordBatch]) -> Result<Vec<Diagnosis>> {
    let mut diagnoses = Vec::new();
    for batch in batches {
        diagnoses.extend(deserialize_batch(batch)?);
    }
    Ok(diagnoses)
}
