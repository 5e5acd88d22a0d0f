//! Derived table writers
//!
//! Typed report rows are converted to Arrow record batches and written as
//! CSV, one file per report. Files are created with truncation, so every
//! run fully replaces the previous output; there are no append or merge
//! semantics.

use arrow::csv::WriterBuilder;
use arrow::datatypes::FieldRef;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// Write typed report rows as a CSV table with a header row
///
/// An empty row set still writes the header, producing an empty but
/// well-formed table.
pub fn write_rows_csv<T>(path: &Path, rows: &[T]) -> Result<()>
where
    T: Serialize,
    for<'de> T: Deserialize<'de>,
{
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)?;

    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;

    log::debug!("wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

/// Write a report value as pretty-printed JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
