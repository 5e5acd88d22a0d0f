//! Report engine orchestration
//!
//! Loads the cohort snapshot once, computes every report from it, and
//! writes the derived tables. Reports never mutate the snapshot; each run
//! fully replaces the previous outputs. A failed run leaves whichever
//! outputs were already written in place.

use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ReportConfig;
use crate::error::util::validate_directory;
use crate::error::{Error, Result};
use crate::loader::{LoadedTable, read_csv};
use crate::models::{
    Admission, Diagnosis, IcdDictionary, LabEvent, LabItemDictionary, Patient,
};
use crate::output::{write_json, write_rows_csv};
use crate::registry::{
    self, REQUIRED_TABLES, TableRegistry, registry_from_name, validate_columns,
};
use crate::report::demographics::{age_summary, gender_distribution, los_histogram, los_summary};
use crate::report::diagnoses::{coding_summary, subject_code_lists, top_diagnoses};
use crate::report::federation::{AgePartial, combine, summarize_partition};
use crate::report::labs::lab_statistics;
use crate::utils::progress::{create_progress_bar, create_spinner};

/// One named patient partition for the federated age report
#[derive(Debug, Clone)]
pub struct PatientPartition {
    /// Partition name, taken from the file stem
    pub name: String,
    /// The partition's patient subset
    pub patients: Vec<Patient>,
}

/// The immutable cohort snapshot all reports are computed from
#[derive(Debug, Clone, Default)]
pub struct CohortSnapshot {
    /// All hospital stays
    pub admissions: Vec<Admission>,
    /// All subjects
    pub patients: Vec<Patient>,
    /// All coded diagnoses
    pub diagnoses: Vec<Diagnosis>,
    /// All laboratory measurements
    pub lab_events: Vec<LabEvent>,
    /// ICD code dimension
    pub icd_dictionary: IcdDictionary,
    /// Lab item dimension
    pub lab_items: LabItemDictionary,
    /// Optional patient partitions for the federated report
    pub partitions: Vec<PatientPartition>,
}

/// Per-partition partial as written to the federated report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionPartial {
    /// Partition name
    pub partition: String,
    /// Sum of ages in years
    pub sum_years: f64,
    /// Number of subjects contributing an age
    pub count: u64,
}

/// The federated age report: per-partition partials plus the combined mean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederatedAgeReport {
    /// One partial per partition
    pub partitions: Vec<PartitionPartial>,
    /// Combined mean age in years; `None` when no subject contributed
    pub combined_mean_years: Option<f64>,
}

/// Row counts and headline figures of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Patients loaded
    pub patients: u64,
    /// Admissions loaded
    pub admissions: u64,
    /// Diagnosis rows loaded
    pub diagnoses: u64,
    /// Lab events loaded
    pub lab_events: u64,
    /// Admissions with a non-null discharge (histogram total)
    pub closed_admissions: u64,
    /// Distinct lab item labels reported on
    pub lab_labels: u64,
    /// Partitions contributing to the federated report
    pub partitions: u64,
    /// Combined federated mean age, when partitions were present
    pub federated_mean_years: Option<f64>,
}

impl RunSummary {
    /// Render the summary as a human-readable block for logging
    #[must_use]
    pub fn render(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Cohort Report Summary:\n");
        summary.push_str(&format!("  Patients: {}\n", self.patients));
        summary.push_str(&format!("  Admissions: {}\n", self.admissions));
        summary.push_str(&format!(
            "  Closed Admissions (in LOS histogram): {}\n",
            self.closed_admissions
        ));
        summary.push_str(&format!("  Diagnosis Rows: {}\n", self.diagnoses));
        summary.push_str(&format!("  Lab Events: {}\n", self.lab_events));
        summary.push_str(&format!("  Lab Labels: {}\n", self.lab_labels));
        match self.federated_mean_years {
            Some(mean) => summary.push_str(&format!(
                "  Federated Mean Age: {mean:.2} years across {} partitions\n",
                self.partitions
            )),
            None => summary.push_str("  Federated Mean Age: not computed\n"),
        }
        summary
    }
}

/// The report engine: a loaded snapshot plus the run configuration
pub struct ReportEngine {
    config: ReportConfig,
    snapshot: CohortSnapshot,
}

impl ReportEngine {
    /// Load all input tables and build the snapshot
    ///
    /// The six required tables are loaded in parallel and fail fast when a
    /// table or required column is missing. Patient partitions are read
    /// from the `partitions/` subdirectory when it exists.
    pub fn load(config: ReportConfig) -> Result<Self> {
        validate_directory(&config.data_dir, "loading cohort tables")?;

        let registries: Vec<Arc<dyn TableRegistry>> = REQUIRED_TABLES
            .iter()
            .map(|name| registry_from_name(name))
            .collect::<Result<_>>()?;

        let progress =
            create_progress_bar(registries.len() as u64, Some("loading cohort tables"));
        let loaded: Vec<(&'static str, LoadedTable)> = registries
            .par_iter()
            .map(|reg| {
                let table = reg.load(&config.data_dir, config.schema_sample_rows)?;
                progress.inc(1);
                Ok((reg.logical_name(), table))
            })
            .collect::<Result<_>>()?;
        progress.finish_and_clear();

        let mut tables: FxHashMap<&str, LoadedTable> = loaded.into_iter().collect();
        let mut take = |name: &str| {
            tables
                .remove(name)
                .ok_or_else(|| Error::schema(name, "table was not loaded"))
        };

        let snapshot = CohortSnapshot {
            admissions: registry::admissions::deserialize(&take("admissions")?.batches)?,
            patients: registry::patients::deserialize(&take("patients")?.batches)?,
            diagnoses: registry::diagnoses::deserialize(&take("diagnoses")?.batches)?,
            lab_events: registry::lab_events::deserialize(&take("lab_events")?.batches)?,
            icd_dictionary: registry::icd_dictionary::deserialize(&take("icd_dictionary")?.batches)?,
            lab_items: registry::lab_items::deserialize(&take("lab_items")?.batches)?,
            partitions: load_partitions(&config)?,
        };

        info!(
            "loaded snapshot: {} patients, {} admissions, {} diagnoses, {} lab events, {} partitions",
            snapshot.patients.len(),
            snapshot.admissions.len(),
            snapshot.diagnoses.len(),
            snapshot.lab_events.len(),
            snapshot.partitions.len()
        );

        Ok(Self { config, snapshot })
    }

    /// Build an engine from an already-constructed snapshot
    #[must_use]
    pub fn from_snapshot(config: ReportConfig, snapshot: CohortSnapshot) -> Self {
        Self { config, snapshot }
    }

    /// The loaded snapshot
    #[must_use]
    pub fn snapshot(&self) -> &CohortSnapshot {
        &self.snapshot
    }

    /// Compute every report and write one derived table per report
    pub fn run_all(&self) -> Result<RunSummary> {
        let out = &self.config.output_dir;
        fs::create_dir_all(out).map_err(|e| Error::io(out.clone(), e))?;

        let spinner = create_spinner("generating reports");
        let snapshot = &self.snapshot;

        let genders = gender_distribution(&snapshot.patients);
        write_rows_csv(&out.join("gender_distribution.csv"), &genders)?;

        let ages = age_summary(&snapshot.patients, &snapshot.admissions);
        write_rows_csv(&out.join("age_summary.csv"), std::slice::from_ref(&ages))?;

        let los = los_summary(&snapshot.admissions);
        write_rows_csv(&out.join("los_summary.csv"), std::slice::from_ref(&los))?;

        let histogram = los_histogram(&snapshot.admissions, self.config.los_bucket_max);
        write_rows_csv(&out.join("los_histogram.csv"), &histogram.to_rows())?;

        let coding = coding_summary(&snapshot.diagnoses);
        write_rows_csv(&out.join("diagnosis_summary.csv"), std::slice::from_ref(&coding))?;

        let top = top_diagnoses(
            &snapshot.diagnoses,
            &snapshot.icd_dictionary,
            snapshot.patients.len(),
        );
        write_rows_csv(&out.join("top_diagnoses.csv"), &top)?;

        let code_lists =
            subject_code_lists(&snapshot.diagnoses, &self.config.code_list_delimiter);
        write_rows_csv(&out.join("subject_diagnoses.csv"), &code_lists)?;

        let labs = lab_statistics(&snapshot.lab_events, &snapshot.lab_items);
        write_rows_csv(&out.join("lab_statistics.csv"), &labs)?;

        let federated = self.run_federation()?;
        spinner.finish_and_clear();

        let summary = RunSummary {
            patients: snapshot.patients.len() as u64,
            admissions: snapshot.admissions.len() as u64,
            diagnoses: snapshot.diagnoses.len() as u64,
            lab_events: snapshot.lab_events.len() as u64,
            closed_admissions: histogram.total(),
            lab_labels: labs.len() as u64,
            partitions: snapshot.partitions.len() as u64,
            federated_mean_years: federated.and_then(|report| report.combined_mean_years),
        };
        info!("{}", summary.render());

        Ok(summary)
    }

    /// Run the federated age report when partitions are present
    ///
    /// Each partition is reduced to its `(sum, count)` partial against the
    /// full admissions table; only the partials are combined.
    fn run_federation(&self) -> Result<Option<FederatedAgeReport>> {
        let snapshot = &self.snapshot;
        if snapshot.partitions.is_empty() {
            info!("no patient partitions found; skipping federated age report");
            return Ok(None);
        }

        let partials: Vec<(String, AgePartial)> = snapshot
            .partitions
            .iter()
            .map(|partition| {
                (
                    partition.name.clone(),
                    summarize_partition(&partition.patients, &snapshot.admissions),
                )
            })
            .collect();

        let combined = combine(
            &partials
                .iter()
                .map(|(_, partial)| *partial)
                .collect::<Vec<_>>(),
        );

        let report = FederatedAgeReport {
            partitions: partials
                .into_iter()
                .map(|(partition, partial)| PartitionPartial {
                    partition,
                    sum_years: partial.sum_years,
                    count: partial.count,
                })
                .collect(),
            combined_mean_years: combined,
        };

        write_json(&self.config.output_dir.join("federated_age.json"), &report)?;
        Ok(Some(report))
    }
}

/// Read the optional patient partitions from `<data_dir>/partitions/*.csv`
fn load_partitions(config: &ReportConfig) -> Result<Vec<PatientPartition>> {
    let dir = config.partitions_dir();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .map_err(|e| Error::io(&dir, e))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut partitions = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .map_or_else(|| "partition".to_string(), |stem| stem.to_string_lossy().into_owned());
        let table = read_csv(&path, config.schema_sample_rows)?;
        validate_columns(
            &name,
            registry::patients::PatientsRegistry.required_columns(),
            &table.schema,
        )?;
        partitions.push(PatientPartition {
            name,
            patients: registry::patients::deserialize(&table.batches)?,
        });
    }
    Ok(partitions)
}
