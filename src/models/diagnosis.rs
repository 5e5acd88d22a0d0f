//! Diagnosis entity model
//!
//! Raw diagnosis rows are one per coded condition per admission, so the same
//! code can repeat across a subject's encounters. Deduplication is the
//! responsibility of the reports, not of this model.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// ICD code system epoch a diagnosis code was recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcdVersion {
    /// ICD-9 coding
    Icd9,
    /// ICD-10 coding
    Icd10,
    /// Any other recorded version value
    Other(i64),
}

impl IcdVersion {
    /// The raw version number as stored in the source tables
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            IcdVersion::Icd9 => 9,
            IcdVersion::Icd10 => 10,
            IcdVersion::Other(v) => v,
        }
    }
}

impl From<i64> for IcdVersion {
    fn from(value: i64) -> Self {
        match value {
            9 => IcdVersion::Icd9,
            10 => IcdVersion::Icd10,
            other => IcdVersion::Other(other),
        }
    }
}

impl Ord for IcdVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_i64().cmp(&other.as_i64())
    }
}

impl PartialOrd for IcdVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IcdVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// One coded diagnosis attached to an admission
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    /// Subject the diagnosis belongs to
    pub subject_id: i64,
    /// Admission the diagnosis was recorded on
    pub hadm_id: i64,
    /// ICD diagnosis code
    pub icd_code: String,
    /// Code system the code belongs to
    pub icd_version: IcdVersion,
}

impl Diagnosis {
    /// Create a new diagnosis
    #[must_use]
    pub fn new(subject_id: i64, hadm_id: i64, icd_code: String, icd_version: IcdVersion) -> Self {
        Self {
            subject_id,
            hadm_id,
            icd_code,
            icd_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_round_trips_through_i64() {
        assert_eq!(IcdVersion::from(9), IcdVersion::Icd9);
        assert_eq!(IcdVersion::from(10), IcdVersion::Icd10);
        assert_eq!(IcdVersion::from(11).as_i64(), 11);
    }

    #[test]
    fn versions_order_by_raw_value() {
        assert!(IcdVersion::Icd9 < IcdVersion::Icd10);
        assert!(IcdVersion::Icd10 < IcdVersion::Other(11));
    }
}
