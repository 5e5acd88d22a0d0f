//! End-to-end tests: write a small cohort extract to disk, run the engine,
//! and check the derived tables.

use cohort_report::report::federation::summarize_partition;
use cohort_report::{Error, FederatedAgeReport, ReportConfig, ReportEngine};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_sample_extract(data_dir: &Path) {
    fs::write(
        data_dir.join("admissions.csv"),
        "subject_id,hadm_id,admittime,dischtime\n\
         1,100,2150-01-01 10:00:00,2150-01-03 10:00:00\n\
         2,200,2150-02-01 00:00:00,2150-02-11 00:00:00\n\
         3,300,2150-03-01 00:00:00,2150-03-21 00:00:00\n\
         4,400,2150-04-01 00:00:00,\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("patients.csv"),
        "subject_id,gender,dob\n\
         1,F,2100-01-01\n\
         2,M,2110-06-15\n\
         3,F,2095-03-10\n\
         4,F,\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("diagnoses_icd.csv"),
        "subject_id,hadm_id,icd_code,icd_version\n\
         1,100,A01,9\n\
         1,100,A01,9\n\
         1,100,B02,10\n\
         2,200,A01,9\n\
         3,300,C03,10\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("d_icd_diagnoses.csv"),
        "icd_code,icd_version,long_title\n\
         A01,9,Typhoid fever\n\
         B02,10,Zoster\n\
         C03,10,Malignant neoplasm of gum\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("labevents.csv"),
        "subject_id,itemid,value,valuenum\n\
         1,50912,1.2,1.2\n\
         1,50912,,\n\
         2,50971,TRACE,\n",
    )
    .unwrap();
    fs::write(
        data_dir.join("d_labitems.csv"),
        "itemid,label\n\
         50912,Creatinine\n\
         50971,Potassium\n",
    )
    .unwrap();

    let partitions = data_dir.join("partitions");
    fs::create_dir(&partitions).unwrap();
    fs::write(
        partitions.join("part_a.csv"),
        "subject_id,gender,dob\n\
         1,F,2100-01-01\n\
         2,M,2110-06-15\n",
    )
    .unwrap();
    fs::write(
        partitions.join("part_b.csv"),
        "subject_id,gender,dob\n\
         3,F,2095-03-10\n\
         4,F,\n",
    )
    .unwrap();
}

fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[test]
fn run_all_writes_every_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    write_sample_extract(dir.path());

    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    let summary = engine.run_all().unwrap();

    assert_eq!(summary.patients, 4);
    assert_eq!(summary.admissions, 4);
    assert_eq!(summary.closed_admissions, 3);
    assert_eq!(summary.diagnoses, 5);
    assert_eq!(summary.lab_events, 3);
    assert_eq!(summary.lab_labels, 2);
    assert_eq!(summary.partitions, 2);
    assert!(summary.federated_mean_years.is_some());

    for file in [
        "gender_distribution.csv",
        "age_summary.csv",
        "los_summary.csv",
        "los_histogram.csv",
        "diagnosis_summary.csv",
        "top_diagnoses.csv",
        "subject_diagnoses.csv",
        "lab_statistics.csv",
        "federated_age.json",
    ] {
        assert!(out.join(file).exists(), "missing output: {file}");
    }
}

#[test]
fn derived_tables_match_the_sample_extract() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    write_sample_extract(dir.path());

    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    engine.run_all().unwrap();

    // Gender: three F, one M
    let genders = data_lines(&out.join("gender_distribution.csv"));
    assert!(genders[0].starts_with("F,3,"));
    assert!(genders[1].starts_with("M,1,"));

    // LOS histogram: stays of 2, 10, and 20 days; the open stay is excluded
    let histogram = data_lines(&out.join("los_histogram.csv"));
    assert!(histogram.contains(&"2,1".to_string()));
    assert!(histogram.contains(&"10,1".to_string()));
    assert!(histogram.contains(&">14,1".to_string()));
    let total: u64 = histogram
        .iter()
        .map(|line| line.rsplit(',').next().unwrap().parse::<u64>().unwrap())
        .sum();
    assert_eq!(total, 3);

    // Top diagnoses: A01 spans subjects 1 and 2 (the duplicate row counts
    // once); B02 and C03 tie and sort by code
    let top = data_lines(&out.join("top_diagnoses.csv"));
    assert!(top[0].starts_with("A01,9,2,50.0,Typhoid fever"));
    assert!(top[1].starts_with("B02,10,1,"));
    assert!(top[2].starts_with("C03,10,1,"));

    // Subject 1's distinct codes, sorted and delimited
    let lists = fs::read_to_string(out.join("subject_diagnoses.csv")).unwrap();
    assert!(lists.contains("A01,B02"));

    // Labs: the all-null-value row makes Creatinine 50% missing; the TRACE
    // row keeps Potassium at 0% missing despite its null valuenum
    let labs = data_lines(&out.join("lab_statistics.csv"));
    assert!(labs[0].starts_with("Creatinine,2,1.2,50.0"));
    assert!(labs[1].starts_with("Potassium,1,"));
    assert!(labs[1].ends_with(",0.0"));
}

#[test]
fn federated_report_matches_single_pass_mean() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    write_sample_extract(dir.path());

    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    engine.run_all().unwrap();

    let report: FederatedAgeReport =
        serde_json::from_str(&fs::read_to_string(out.join("federated_age.json")).unwrap())
            .unwrap();

    assert_eq!(report.partitions.len(), 2);
    assert_eq!(report.partitions[0].partition, "part_a");
    assert_eq!(report.partitions[0].count, 2);
    // Subject 4 has no birth date and contributes nothing
    assert_eq!(report.partitions[1].count, 1);

    let snapshot = engine.snapshot();
    let single_pass = summarize_partition(&snapshot.patients, &snapshot.admissions)
        .mean()
        .unwrap();
    let combined = report.combined_mean_years.unwrap();
    assert!((combined - single_pass).abs() < 1e-9);
}

#[test]
fn reruns_fully_replace_outputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    write_sample_extract(dir.path());

    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    engine.run_all().unwrap();
    assert!(data_lines(&out.join("gender_distribution.csv"))[0].starts_with("F,3,"));

    // Drop subject 4 and rerun; the old distribution must be gone
    fs::write(
        dir.path().join("patients.csv"),
        "subject_id,gender,dob\n\
         1,F,2100-01-01\n\
         2,M,2110-06-15\n\
         3,F,2095-03-10\n",
    )
    .unwrap();
    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    engine.run_all().unwrap();
    assert!(data_lines(&out.join("gender_distribution.csv"))[0].starts_with("F,2,"));
}

#[test]
fn missing_required_column_fails_fast_naming_table_and_column() {
    let dir = TempDir::new().unwrap();
    write_sample_extract(dir.path());
    fs::write(
        dir.path().join("admissions.csv"),
        "subject_id,hadm_id,admittime\n1,100,2150-01-01 10:00:00\n",
    )
    .unwrap();

    let err = ReportEngine::load(ReportConfig::new(dir.path(), dir.path().join("outputs")))
        .err()
        .expect("load should fail");
    match err {
        Error::MissingColumn { table, column } => {
            assert_eq!(table, "admissions");
            assert_eq!(column, "dischtime");
        }
        other => panic!("expected a missing-column error, got {other}"),
    }
}

#[test]
fn missing_table_fails_fast_with_its_path() {
    let dir = TempDir::new().unwrap();
    write_sample_extract(dir.path());
    fs::remove_file(dir.path().join("labevents.csv")).unwrap();

    let result = ReportEngine::load(ReportConfig::new(dir.path(), dir.path().join("outputs")));
    let message = format!("{}", result.err().unwrap());
    assert!(message.contains("labevents.csv"), "unexpected error: {message}");
}

#[test]
fn sparse_extract_still_generates_all_reports() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("outputs");
    fs::write(
        dir.path().join("admissions.csv"),
        "subject_id,hadm_id,admittime,dischtime\n",
    )
    .unwrap();
    fs::write(dir.path().join("patients.csv"), "subject_id,gender,dob\n").unwrap();
    fs::write(
        dir.path().join("diagnoses_icd.csv"),
        "subject_id,hadm_id,icd_code,icd_version\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("d_icd_diagnoses.csv"),
        "icd_code,icd_version,long_title\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("labevents.csv"),
        "subject_id,itemid,value,valuenum\n",
    )
    .unwrap();
    fs::write(dir.path().join("d_labitems.csv"), "itemid,label\n").unwrap();

    let engine = ReportEngine::load(ReportConfig::new(dir.path(), &out)).unwrap();
    let summary = engine.run_all().unwrap();

    assert_eq!(summary.patients, 0);
    assert_eq!(summary.closed_admissions, 0);
    assert_eq!(summary.federated_mean_years, None);

    // Empty but well-formed tables, headers included
    let ages = fs::read_to_string(out.join("age_summary.csv")).unwrap();
    assert!(ages.starts_with("subjects,"));
    assert!(out.join("gender_distribution.csv").exists());
    assert!(!out.join("federated_age.json").exists());
}
