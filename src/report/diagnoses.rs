//! Diagnosis coding report
//!
//! Raw diagnosis rows repeat a code for every admission it was recorded on,
//! so every metric here deduplicates `(code, version)` pairs per subject
//! before counting.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Diagnosis, IcdDictionary, IcdVersion};

/// Number of rows in the top-diagnoses report
pub const TOP_DIAGNOSES_LIMIT: usize = 10;

/// Distinct-code summary over subjects with at least one diagnosis row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingSummary {
    /// Subjects with at least one diagnosis row
    pub subjects: u64,
    /// Average number of distinct `(code, version)` pairs per such subject
    pub avg_distinct_codes: f64,
}

/// Average number of distinct `(code, version)` pairs per subject
///
/// Duplicating a diagnosis row never changes the result; pairs are
/// deduplicated per subject before counting. Zero subjects yield an average
/// of zero rather than a division error.
#[must_use]
pub fn coding_summary(diagnoses: &[Diagnosis]) -> CodingSummary {
    let mut per_subject: FxHashMap<i64, FxHashSet<(&str, IcdVersion)>> = FxHashMap::default();
    for diagnosis in diagnoses {
        per_subject
            .entry(diagnosis.subject_id)
            .or_default()
            .insert((diagnosis.icd_code.as_str(), diagnosis.icd_version));
    }

    let subjects = per_subject.len();
    let distinct_total: usize = per_subject.values().map(FxHashSet::len).sum();

    CodingSummary {
        subjects: subjects as u64,
        avg_distinct_codes: if subjects == 0 {
            0.0
        } else {
            distinct_total as f64 / subjects as f64
        },
    }
}

/// One row of the top-diagnoses report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDiagnosis {
    /// ICD diagnosis code
    pub icd_code: String,
    /// Raw code system version
    pub icd_version: i64,
    /// Subjects carrying the code at least once
    pub subject_count: u64,
    /// Share of all subjects in the cohort, in percent
    pub percentage: f64,
    /// Descriptive title from the ICD dictionary, when known
    pub long_title: Option<String>,
}

/// The most frequent distinct `(code, version)` pairs by subject count
///
/// A subject with the same code on five admissions counts once. Rows are
/// ordered by subject count descending with ties broken by code ascending,
/// then version ascending, and capped at [`TOP_DIAGNOSES_LIMIT`].
/// `total_subjects` is the size of the patients table; percentages are zero
/// when it is zero.
#[must_use]
pub fn top_diagnoses(
    diagnoses: &[Diagnosis],
    dictionary: &IcdDictionary,
    total_subjects: usize,
) -> Vec<TopDiagnosis> {
    let mut subjects_by_pair: FxHashMap<(&str, IcdVersion), FxHashSet<i64>> = FxHashMap::default();
    for diagnosis in diagnoses {
        subjects_by_pair
            .entry((diagnosis.icd_code.as_str(), diagnosis.icd_version))
            .or_default()
            .insert(diagnosis.subject_id);
    }

    let mut ranked: Vec<(&str, IcdVersion, u64)> = subjects_by_pair
        .into_iter()
        .map(|((code, version), subjects)| (code, version, subjects.len() as u64))
        .collect();
    ranked.sort_by(|a, b| {
        b.2.cmp(&a.2)
            .then_with(|| a.0.cmp(b.0))
            .then_with(|| a.1.cmp(&b.1))
    });
    ranked.truncate(TOP_DIAGNOSES_LIMIT);

    ranked
        .into_iter()
        .map(|(code, version, subject_count)| TopDiagnosis {
            icd_code: code.to_string(),
            icd_version: version.as_i64(),
            subject_count,
            percentage: if total_subjects == 0 {
                0.0
            } else {
                subject_count as f64 / total_subjects as f64 * 100.0
            },
            long_title: dictionary.long_title(code, version).map(str::to_string),
        })
        .collect()
}

/// One subject's distinct diagnosis codes as a delimited string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCodes {
    /// Subject identifier
    pub subject_id: i64,
    /// Number of distinct codes for the subject
    pub distinct_codes: u64,
    /// The codes themselves, sorted ascending and delimited
    pub codes: String,
}

/// Per-subject distinct code lists, ordered by subject identifier ascending
///
/// Codes within a subject are sorted ascending so the formatted list is
/// deterministic.
#[must_use]
pub fn subject_code_lists(diagnoses: &[Diagnosis], delimiter: &str) -> Vec<SubjectCodes> {
    let mut by_subject: BTreeMap<i64, BTreeSet<&str>> = BTreeMap::new();
    for diagnosis in diagnoses {
        by_subject
            .entry(diagnosis.subject_id)
            .or_default()
            .insert(diagnosis.icd_code.as_str());
    }

    by_subject
        .into_iter()
        .map(|(subject_id, codes)| SubjectCodes {
            subject_id,
            distinct_codes: codes.len() as u64,
            codes: codes.into_iter().collect::<Vec<_>>().join(delimiter),
        })
        .collect()
}
