//! Demographics and length-of-stay report
//!
//! Computes the gender frequency distribution, age at first admission, and
//! length-of-stay statistics including the fixed-bucket histogram.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{first_admission_by_subject, mean, median};
use crate::models::{Admission, Gender, Patient};

/// One gender category with its frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderCount {
    /// Gender label
    pub gender: String,
    /// Number of patients in the category
    pub count: u64,
    /// Share of all patients, in percent
    pub percentage: f64,
}

/// Gender frequency distribution over the patients table
///
/// Categories are ordered by count descending, label ascending on ties. An
/// empty patients table yields an empty distribution rather than an error.
#[must_use]
pub fn gender_distribution(patients: &[Patient]) -> Vec<GenderCount> {
    let mut counts: FxHashMap<Gender, u64> = FxHashMap::default();
    for patient in patients {
        *counts.entry(patient.gender).or_insert(0) += 1;
    }

    let total = patients.len();
    counts
        .into_iter()
        .map(|(gender, count)| GenderCount {
            gender: gender.to_string(),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.gender.cmp(&b.gender)))
        .collect()
}

/// Age-at-first-admission summary in years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeSummary {
    /// Subjects contributing an age (known birth date and at least one admission)
    pub subjects: u64,
    /// Mean age in years; NaN when no subject contributes
    pub mean_years: f64,
    /// Median age in years; NaN when no subject contributes
    pub median_years: f64,
}

/// Mean and median age at each subject's first admission
///
/// Subjects without a birth date or without any admission are excluded.
#[must_use]
pub fn age_summary(patients: &[Patient], admissions: &[Admission]) -> AgeSummary {
    let first_admits = first_admission_by_subject(admissions);

    let ages: Vec<f64> = patients
        .iter()
        .filter_map(|patient| {
            first_admits
                .get(&patient.subject_id)
                .and_then(|admit| patient.age_at(*admit))
        })
        .collect();

    AgeSummary {
        subjects: ages.len() as u64,
        mean_years: mean(&ages),
        median_years: median(&ages),
    }
}

/// Length-of-stay summary in fractional days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosSummary {
    /// Admissions with a non-null discharge time
    pub admissions: u64,
    /// Mean stay in days; NaN when no admission qualifies
    pub mean_days: f64,
    /// Median stay in days; NaN when no admission qualifies
    pub median_days: f64,
}

/// Length-of-stay statistics over closed admissions
#[must_use]
pub fn los_summary(admissions: &[Admission]) -> LosSummary {
    let stays: Vec<f64> = admissions.iter().filter_map(Admission::los_days).collect();
    LosSummary {
        admissions: stays.len() as u64,
        mean_days: mean(&stays),
        median_days: median(&stays),
    }
}

/// One histogram bucket as written to the derived table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosBucket {
    /// Bucket label: whole days, or `>N` for the overflow bucket
    pub los_days: String,
    /// Admissions falling in the bucket
    pub count: u64,
}

/// Length-of-stay histogram with day-wide buckets and an overflow bucket
#[derive(Debug, Clone, PartialEq)]
pub struct LosHistogram {
    /// Upper bucket edge in whole days, inclusive
    pub bucket_max: u32,
    /// One count per whole day in `0..=bucket_max`
    pub buckets: Vec<u64>,
    /// Admissions with a stay strictly longer than `bucket_max` days
    pub overflow: u64,
}

impl LosHistogram {
    /// Total count across all buckets including overflow
    ///
    /// Equals the number of admissions with a non-null discharge time.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum::<u64>() + self.overflow
    }

    /// Flatten into labelled rows for the derived table
    #[must_use]
    pub fn to_rows(&self) -> Vec<LosBucket> {
        let mut rows: Vec<LosBucket> = self
            .buckets
            .iter()
            .enumerate()
            .map(|(day, count)| LosBucket {
                los_days: day.to_string(),
                count: *count,
            })
            .collect();
        rows.push(LosBucket {
            los_days: format!(">{}", self.bucket_max),
            count: self.overflow,
        });
        rows
    }
}

/// Bucket closed admissions by whole days of stay over `[0, bucket_max]`
///
/// A stay of exactly `bucket_max` days lands in the last regular bucket;
/// anything longer lands in the overflow bucket. Stays with a discharge
/// before the admit (dirty data) clamp into bucket 0 so no closed admission
/// is dropped from the histogram.
#[must_use]
pub fn los_histogram(admissions: &[Admission], bucket_max: u32) -> LosHistogram {
    let mut buckets = vec![0_u64; bucket_max as usize + 1];
    let mut overflow = 0_u64;

    for los in admissions.iter().filter_map(Admission::los_days) {
        if los > f64::from(bucket_max) {
            overflow += 1;
        } else {
            let day = los.floor().max(0.0) as usize;
            buckets[day.min(bucket_max as usize)] += 1;
        }
    }

    LosHistogram {
        bucket_max,
        buckets,
        overflow,
    }
}
