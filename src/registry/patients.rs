//! Patients table registry

use arrow::record_batch::RecordBatch;

use super::TableRegistry;
use crate::error::Result;
use crate::models::adapters::{date_column, i64_column, opt_string, require_i64, string_column};
use crate::models::{Gender, Patient};

/// Logical name of the patients table
pub const TABLE: &str = "patients";

/// Registry for the patients table
pub struct PatientsRegistry;

impl TableRegistry for PatientsRegistry {
    fn logical_name(&self) -> &'static str {
        TABLE
    }

    fn file_name(&self) -> &'static str {
        "patients.csv"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &["subject_id", "gender", "dob"]
    }
}

/// Deserialize one record batch into patients
///
/// An absent gender maps to [`Gender::Unknown`]; an absent birth date stays
/// `None` and excludes the patient from age statistics downstream.
pub fn deserialize_batch(batch: &RecordBatch) -> Result<Vec<Patient>> {
    let subject_ids = i64_column(batch, TABLE, "subject_id")?;
    let genders = string_column(batch, TABLE, "gender")?;
    let birth_dates = date_column(batch, TABLE, "dob")?;

    let mut patients = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let gender = opt_string(&genders, row)
            .map(|raw| Gender::from(raw.as_str()))
            .unwrap_or(Gender::Unknown);
        patients.push(Patient::new(
            require_i64(&subject_ids, TABLE, "subject_id", row)?,
            gender,
            birth_dates[row],
        ));
    }
    Ok(patients)
}

/// Deserialize all record batches of the patients table
pub fn deserialize(batches: &[RecordBatch]) -> Result<Vec<Patient>> {
    let mut patients = Vec::new();
    for batch in batches {
        patients.extend(deserialize_batch(batch)?);
    }
    Ok(patients)
}
