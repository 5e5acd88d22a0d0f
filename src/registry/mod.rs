//! Registry definitions and loaders for the input tables
//!
//! Six tables make up a cohort extract, addressed by logical name:
//!
//! - admissions: one row per hospital stay
//! - patients: one row per subject
//! - diagnoses: coded diagnoses, many per admission
//! - lab_events: laboratory measurements, many per subject
//! - icd_dictionary: ICD code dimension with descriptive titles
//! - lab_items: lab item dimension with measurement labels
//!
//! Each registry knows its logical name, default file name, and required
//! columns, and provides deserialization from record batches into the
//! corresponding domain models. Loading validates the required columns up
//! front so a malformed extract fails fast, naming the table and column.

pub mod admissions;
pub mod diagnoses;
pub mod icd_dictionary;
pub mod lab_events;
pub mod lab_items;
pub mod patients;

use arrow::datatypes::SchemaRef;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::loader::{LoadedTable, read_csv};

/// Base trait for table registries
pub trait TableRegistry: Send + Sync {
    /// Logical name of the table
    fn logical_name(&self) -> &'static str;

    /// Default file name of the table inside the data directory
    fn file_name(&self) -> &'static str;

    /// Columns a valid extract of this table must carry
    fn required_columns(&self) -> &'static [&'static str];

    /// Load the table from the data directory and validate its columns
    fn load(&self, data_dir: &Path, sample_rows: usize) -> Result<LoadedTable> {
        let path = data_dir.join(self.file_name());
        let table = read_csv(&path, sample_rows)?;
        validate_columns(self.logical_name(), self.required_columns(), &table.schema)?;
        Ok(table)
    }
}

/// Check that every required column is present in a table schema
pub fn validate_columns(
    table: &str,
    required: &[&str],
    schema: &SchemaRef,
) -> Result<()> {
    for column in required {
        if schema.field_with_name(column).is_err() {
            return Err(Error::missing_column(table, *column));
        }
    }
    Ok(())
}

/// Create a table registry from a logical name
pub fn registry_from_name(name: &str) -> Result<Arc<dyn TableRegistry>> {
    match name.to_lowercase().as_str() {
        "admissions" => Ok(Arc::new(admissions::AdmissionsRegistry)),
        "patients" => Ok(Arc::new(patients::PatientsRegistry)),
        "diagnoses" => Ok(Arc::new(diagnoses::DiagnosesRegistry)),
        "lab_events" => Ok(Arc::new(lab_events::LabEventsRegistry)),
        "icd_dictionary" => Ok(Arc::new(icd_dictionary::IcdDictionaryRegistry)),
        "lab_items" => Ok(Arc::new(lab_items::LabItemsRegistry)),
        other => Err(Error::schema(other, "unknown table registry")),
    }
}

/// Logical names of all required tables, in load order
pub const REQUIRED_TABLES: &[&str] = &[
    "admissions",
    "patients",
    "diagnoses",
    "lab_events",
    "icd_dictionary",
    "lab_items",
];
