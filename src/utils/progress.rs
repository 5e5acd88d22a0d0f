//! Progress reporting utilities
//!
//! Standardized progress bars for table loading, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Default style for the table-loading progress bar
pub const DEFAULT_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create a progress bar with the standardized style
#[must_use]
pub fn create_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Create a spinner for an operation of unknown length
#[must_use]
pub fn create_spinner(description: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(description.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
