//! Static dimension lookups
//!
//! Two reference tables accompany the event tables: the ICD dictionary
//! mapping `(code, version)` pairs to descriptive titles, and the lab item
//! dictionary mapping item identifiers to labels.

use rustc_hash::FxHashMap;

use crate::models::diagnosis::IcdVersion;

/// Lookup from `(icd_code, icd_version)` to the code's long title
#[derive(Debug, Clone, Default)]
pub struct IcdDictionary {
    titles: FxHashMap<(String, IcdVersion), String>,
}

impl IcdDictionary {
    /// Build a dictionary from `(code, version, title)` rows
    #[must_use]
    pub fn from_rows(rows: Vec<(String, IcdVersion, String)>) -> Self {
        let mut titles = FxHashMap::default();
        for (code, version, title) in rows {
            titles.insert((code, version), title);
        }
        Self { titles }
    }

    /// Long title for a code, if the dictionary knows it
    #[must_use]
    pub fn long_title(&self, code: &str, version: IcdVersion) -> Option<&str> {
        self.titles
            .get(&(code.to_string(), version))
            .map(String::as_str)
    }

    /// Number of codes in the dictionary
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the dictionary is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Lookup from lab item identifier to its human-readable label
#[derive(Debug, Clone, Default)]
pub struct LabItemDictionary {
    labels: FxHashMap<i64, String>,
}

impl LabItemDictionary {
    /// Build a dictionary from `(item_id, label)` rows
    #[must_use]
    pub fn from_rows(rows: Vec<(i64, String)>) -> Self {
        let mut labels = FxHashMap::default();
        for (item_id, label) in rows {
            labels.insert(item_id, label);
        }
        Self { labels }
    }

    /// Label for an item, if the dictionary knows it
    #[must_use]
    pub fn label(&self, item_id: i64) -> Option<&str> {
        self.labels.get(&item_id).map(String::as_str)
    }

    /// Number of items in the dictionary
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dictionary is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
