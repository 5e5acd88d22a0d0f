//! Report computations
//!
//! Each report is a pure function of the loaded model slices and returns
//! typed result rows with a declared schema; none of them mutates the
//! snapshot, so they can run in any order.

pub mod demographics;
pub mod diagnoses;
pub mod federation;
pub mod labs;

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use crate::models::Admission;

/// Earliest admit time per subject
#[must_use]
pub fn first_admission_by_subject(admissions: &[Admission]) -> FxHashMap<i64, NaiveDateTime> {
    let mut first: FxHashMap<i64, NaiveDateTime> = FxHashMap::default();
    for admission in admissions {
        first
            .entry(admission.subject_id)
            .and_modify(|earliest| {
                if admission.admit_time < *earliest {
                    *earliest = admission.admit_time;
                }
            })
            .or_insert(admission.admit_time);
    }
    first
}

/// Arithmetic mean; NaN for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; NaN for an empty slice
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
