//! Domain models for the clinical cohort
//!
//! This module contains the typed entities the reports are computed from:
//! admissions, patients, diagnoses, lab events, and the two dimension
//! lookups. All of them are read-only snapshots; no report mutates them.

pub mod adapters;
pub mod admission;
pub mod diagnosis;
pub mod dimensions;
pub mod lab_event;
pub mod patient;

pub use admission::Admission;
pub use diagnosis::{Diagnosis, IcdVersion};
pub use dimensions::{IcdDictionary, LabItemDictionary};
pub use lab_event::LabEvent;
pub use patient::{Gender, Patient};
