//! Configuration for the report engine.

use std::path::PathBuf;

/// Configuration for a report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory containing the input CSV tables
    pub data_dir: PathBuf,
    /// Directory the derived report tables are written to
    pub output_dir: PathBuf,
    /// Upper edge (in whole days, inclusive) of the length-of-stay histogram;
    /// stays longer than this land in the overflow bucket
    pub los_bucket_max: u32,
    /// Delimiter used when formatting per-subject diagnosis code lists
    pub code_list_delimiter: String,
    /// Maximum number of rows sampled when inferring a CSV schema
    pub schema_sample_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("outputs"),
            los_bucket_max: 14,
            code_list_delimiter: ",".to_string(),
            schema_sample_rows: 1000,
        }
    }
}

impl ReportConfig {
    /// Create a configuration for the given data and output directories
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Directory scanned for optional patient partition tables
    #[must_use]
    pub fn partitions_dir(&self) -> PathBuf {
        self.data_dir.join("partitions")
    }
}
