//! Tests for the federated age aggregation
//!
//! The combine step works on (sum, count) partials alone; these tests check
//! that any disjoint partitioning of the cohort reproduces the single-pass
//! mean.

use chrono::{NaiveDate, NaiveDateTime};
use cohort_report::models::{Admission, Gender, Patient};
use cohort_report::report::federation::{AgePartial, combine, summarize_partition};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn cohort() -> (Vec<Patient>, Vec<Admission>) {
    let patients: Vec<Patient> = (1..=6)
        .map(|id| {
            Patient::new(
                id,
                Gender::Female,
                NaiveDate::from_ymd_opt(2080 + id as i32 * 5, 1, 1),
            )
        })
        .collect();
    let admissions: Vec<Admission> = (1..=6)
        .map(|id| Admission::new(id, 100 + id, dt(2150, 1, 1), Some(dt(2150, 1, 2))))
        .collect();
    (patients, admissions)
}

#[test]
fn worked_example_combines_to_thirty() {
    let partials = [
        AgePartial {
            sum_years: 300.0,
            count: 10,
        },
        AgePartial {
            sum_years: 450.0,
            count: 15,
        },
    ];
    assert_eq!(combine(&partials), Some(30.0));
}

#[test]
fn any_partitioning_matches_the_single_pass_mean() {
    let (patients, admissions) = cohort();
    let single_pass = summarize_partition(&patients, &admissions)
        .mean()
        .unwrap();

    let partitionings: Vec<Vec<&[Patient]>> = vec![
        vec![&patients[..]],
        vec![&patients[..2], &patients[2..]],
        vec![&patients[..1], &patients[1..4], &patients[4..]],
    ];

    for partitioning in partitionings {
        let partials: Vec<AgePartial> = partitioning
            .iter()
            .map(|part| summarize_partition(part, &admissions))
            .collect();
        let combined = combine(&partials).unwrap();
        assert!(
            (combined - single_pass).abs() < 1e-9,
            "partitioning into {} parts drifted: {combined} vs {single_pass}",
            partials.len()
        );
    }
}

#[test]
fn subjects_without_birth_date_or_admission_are_skipped() {
    let (mut patients, admissions) = cohort();
    patients.push(Patient::new(7, Gender::Male, None));
    patients.push(Patient::new(
        8,
        Gender::Male,
        NaiveDate::from_ymd_opt(2100, 1, 1),
    ));
    // Subject 7 has no birth date, subject 8 has no admission

    let partial = summarize_partition(&patients, &admissions);
    assert_eq!(partial.count, 6);
}

#[test]
fn empty_total_is_undefined_not_a_crash() {
    assert_eq!(combine(&[]), None);

    let no_patients = summarize_partition(&[], &[]);
    assert_eq!(no_patients.count, 0);
    assert_eq!(combine(&[no_patients]), None);
}

#[test]
fn merge_is_associative() {
    let a = AgePartial::of_age(30.0);
    let b = AgePartial::of_age(40.0);
    let c = AgePartial::of_age(50.0);

    assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
}
