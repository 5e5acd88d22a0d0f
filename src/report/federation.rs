//! Federated age aggregation
//!
//! Computes the global mean age at first admission across disjoint patient
//! partitions without ever materializing a combined row-level table. Each
//! partition is reduced to an [`AgePartial`] sufficient statistic (sum of
//! ages, count); only these scalars cross the partition boundary. The
//! combine step accepts partials alone, so per-row data structurally cannot
//! reach it.

use serde::{Deserialize, Serialize};

use super::first_admission_by_subject;
use crate::models::{Admission, Patient};

/// Mergeable sufficient statistic for a mean age: sum of ages and count
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgePartial {
    /// Sum of ages in years across the partition's qualifying subjects
    pub sum_years: f64,
    /// Number of qualifying subjects
    pub count: u64,
}

impl AgePartial {
    /// Partial carrying a single age
    #[must_use]
    pub fn of_age(years: f64) -> Self {
        Self {
            sum_years: years,
            count: 1,
        }
    }

    /// Fold one more age into the partial
    pub fn add_age(&mut self, years: f64) {
        self.sum_years += years;
        self.count += 1;
    }

    /// Merge two partials; associative and commutative
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum_years: self.sum_years + other.sum_years,
            count: self.count + other.count,
        }
    }

    /// Mean age represented by the partial; `None` when the count is zero
    #[must_use]
    pub fn mean(self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_years / self.count as f64)
        }
    }
}

/// Reduce one patient partition to its age partial
///
/// The partition's patients are joined against the full admissions table,
/// restricted to each subject's earliest admission, and each qualifying
/// subject contributes their age in years at that admission. Subjects with
/// no birth date or no admission are skipped.
#[must_use]
pub fn summarize_partition(patients: &[Patient], admissions: &[Admission]) -> AgePartial {
    let first_admits = first_admission_by_subject(admissions);

    let mut partial = AgePartial::default();
    for patient in patients {
        if let Some(age) = first_admits
            .get(&patient.subject_id)
            .and_then(|admit| patient.age_at(*admit))
        {
            partial.add_age(age);
        }
    }
    partial
}

/// Combine per-partition partials into the global mean age
///
/// `(Σ sum_i) / (Σ n_i)` over k ≥ 1 partials; `None` when the total count
/// is zero. Equals the single-pass mean over the union of the partitions'
/// rows.
#[must_use]
pub fn combine(partials: &[AgePartial]) -> Option<f64> {
    partials
        .iter()
        .copied()
        .fold(AgePartial::default(), AgePartial::merge)
        .mean()
}
