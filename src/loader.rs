//! CSV table loading utilities

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use crate::error::util::safe_open_file;
use crate::error::{Error, Result};

/// A CSV table read into memory: the inferred schema plus all record batches
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Schema inferred from the header row and a sample of the data
    pub schema: SchemaRef,
    /// All record batches of the table, in file order
    pub batches: Vec<RecordBatch>,
}

impl LoadedTable {
    /// Total number of data rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

/// Read a CSV file into Arrow record batches
///
/// The schema is inferred from the header row plus up to `sample_rows` data
/// rows, then the whole file is decoded against it. The schema is returned
/// alongside the batches so required-column validation works even for tables
/// that carry a header but no rows.
pub fn read_csv(path: &Path, sample_rows: usize) -> Result<LoadedTable> {
    let mut file = safe_open_file(path, "reading CSV table")?;

    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, Some(sample_rows))?;
    file.rewind().map_err(|e| Error::io(path, e))?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .build(file)?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    log::debug!(
        "read {} rows from {}",
        batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
        path.display()
    );

    Ok(LoadedTable { schema, batches })
}
