//! Admission entity model
//!
//! One record per hospital stay. Length of stay is derived from the admit
//! and discharge timestamps; admissions still open at extract time carry a
//! null discharge and are excluded from LOS statistics.

use chrono::NaiveDateTime;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Representation of a single hospital stay
#[derive(Debug, Clone, PartialEq)]
pub struct Admission {
    /// Subject the stay belongs to
    pub subject_id: i64,
    /// Identifier of the stay itself
    pub hadm_id: i64,
    /// Time the subject was admitted
    pub admit_time: NaiveDateTime,
    /// Time the subject was discharged, if the stay has ended
    pub discharge_time: Option<NaiveDateTime>,
}

impl Admission {
    /// Create a new admission
    #[must_use]
    pub fn new(
        subject_id: i64,
        hadm_id: i64,
        admit_time: NaiveDateTime,
        discharge_time: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            subject_id,
            hadm_id,
            admit_time,
            discharge_time,
        }
    }

    /// Length of stay in fractional days, or `None` while the stay is open
    #[must_use]
    pub fn los_days(&self) -> Option<f64> {
        self.discharge_time
            .map(|discharge| (discharge - self.admit_time).num_seconds() as f64 / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn los_is_fractional_days() {
        let adm = Admission::new(1, 100, dt(2150, 1, 1, 0), Some(dt(2150, 1, 3, 12)));
        assert_eq!(adm.los_days(), Some(2.5));
    }

    #[test]
    fn open_stay_has_no_los() {
        let adm = Admission::new(1, 100, dt(2150, 1, 1, 0), None);
        assert_eq!(adm.los_days(), None);
    }
}
