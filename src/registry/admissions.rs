//! Admissions table registry

use arrow::record_batch::RecordBatch;

use super::TableRegistry;
use crate::error::{Error, Result};
use crate::models::Admission;
use crate::models::adapters::{datetime_column, i64_column, require_i64};

/// Logical name of the admissions table
pub const TABLE: &str = "admissions";

/// Registry for the admissions table
pub struct AdmissionsRegistry;

impl TableRegistry for AdmissionsRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "admissions.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["subject_id", "hadm_id", "admittime", "dischtime"]
    }
}

/// Deserialize one record batch into admissions
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<Admission>> {
    let subject_ids = i64_column(batch, TABLE, "subject_id")?;
    let hadm_ids = i64_column(batch, TABLE, "hadm_id")?;
    let admit_times = datetime_column(batch, TABLE, "admittime")?;
    let discharge_times = datetime_column(batch, TABLE, "dischtime")?;

    let mut admissions = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let admit_time = admit_times[row].ok_or_else(|| {
            Error::schema(TABLE, format!("column 'admittime' has a null value at row {row}"))
        })?;
        admissions.push(Admission::new(
            require_i64(&subject_ids, TABLE, "subject_id", row)?,
            require_i64(&hadm_ids, TABLE, "hadm_id", row)?,
            admit_time,
            discharge_times[row],
        ));
    }
    Ok(admissions)
}

/// Deserialize all record batches of the admissions table
pub fn deserialize(batches: &[RecordBatch]) -> Result<Vec<Admission>> {
    let mut admissions = Vec::new();
    for batch in batches {
        admissions.extend(deserialize_batch(batch)?);
    }
    Ok(admissions)
}
