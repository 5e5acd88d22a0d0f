use anyhow::Context;
use cohort_report::{ReportConfig, ReportEngine};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".to_string()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "outputs".to_string()));

    info!("generating reports from: {}", data_dir.display());

    let config = ReportConfig::new(data_dir, output_dir);
    let start = Instant::now();

    let engine = ReportEngine::load(config).context("failed to load cohort tables")?;
    let summary = engine.run_all().context("failed to generate reports")?;

    info!(
        "generated all reports for {} patients in {:?}",
        summary.patients,
        start.elapsed()
    );

    Ok(())
}
