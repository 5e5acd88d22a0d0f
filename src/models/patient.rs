//! Patient entity model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days per year used when converting day spans to ages
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Gender as recorded in the patients table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Recorded as female
    Female,
    /// Recorded as male
    Male,
    /// Any other or absent value
    Unknown,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "f" | "female" => Gender::Female,
            "m" | "male" => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("F"),
            Gender::Male => f.write_str("M"),
            Gender::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Representation of a unique individual in the cohort
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    /// Subject identifier, unique across the cohort
    pub subject_id: i64,
    /// Recorded gender
    pub gender: Gender,
    /// Date of birth, if known
    pub birth_date: Option<NaiveDate>,
}

impl Patient {
    /// Create a new patient
    #[must_use]
    pub fn new(subject_id: i64, gender: Gender, birth_date: Option<NaiveDate>) -> Self {
        Self {
            subject_id,
            gender,
            birth_date,
        }
    }

    /// Age in fractional years at the given instant, or `None` when the
    /// birth date is unknown
    #[must_use]
    pub fn age_at(&self, at: NaiveDateTime) -> Option<f64> {
        self.birth_date
            .map(|birth| (at.date() - birth).num_days() as f64 / DAYS_PER_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parsing_is_case_insensitive() {
        assert_eq!(Gender::from("F"), Gender::Female);
        assert_eq!(Gender::from("male"), Gender::Male);
        assert_eq!(Gender::from(""), Gender::Unknown);
        assert_eq!(Gender::from("X"), Gender::Unknown);
    }

    #[test]
    fn age_uses_mean_tropical_year() {
        let patient = Patient::new(1, Gender::Female, NaiveDate::from_ymd_opt(2100, 1, 1));
        let at = NaiveDate::from_ymd_opt(2150, 1, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let age = patient.age_at(at).unwrap();
        assert!((age - 50.0).abs() < 0.05);
    }

    #[test]
    fn age_requires_birth_date() {
        let patient = Patient::new(1, Gender::Male, None);
        let at = NaiveDate::from_ymd_opt(2150, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(patient.age_at(at), None);
    }
}
