// src/pipeline.rs

use anyhow::{Context, Result};
use tracing::info;

use crate::collect::{collect, CohortNamer, FirstDotPrefix};
use crate::config::{Config, Inputs};
use crate::emit::{
    driver_genes, driver_report, load_reference, unique_drivers, vetted_report, write_reports,
    Reports,
};
use crate::enrich::{enrich_drivers, enrich_vetted};
use crate::load::{load_cohorts, load_mutations};

/// Row counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows across all driver-candidate files.
    pub drivers_in: usize,
    pub drivers_kept: usize,
    /// Driver rows with no matching mutation count.
    pub drivers_dropped: usize,
    pub vetted_rows: usize,
    pub driver_genes: usize,
    pub unique_rows: usize,
}

/// Build all three reports in memory. Nothing is written.
pub fn build_reports(inputs: &Inputs, config: &Config, namer: &dyn CohortNamer) -> Result<(Reports, RunSummary)> {
    let collected = collect(&inputs.pairs, namer).context("collecting cohort results")?;
    let cohorts = load_cohorts(&inputs.cohorts).context("loading cohorts")?;
    let mutations = load_mutations(&inputs.mutations).context("loading mutations")?;

    let drivers_in = collected.drivers.len();
    let enriched = enrich_drivers(collected.drivers, &cohorts, &mutations)?;
    let vetted = enrich_vetted(collected.vetted, &cohorts, &mutations)?;

    let drivers = driver_report(&enriched.table).context("building drivers report")?;
    let unfiltered = vetted_report(&vetted).context("building unfiltered drivers report")?;

    let genes = driver_genes(&drivers)?;
    let reference = load_reference(config.reference_path())?;
    let unique = unique_drivers(reference, &genes).context("building unique drivers report")?;

    let summary = RunSummary {
        drivers_in,
        drivers_kept: drivers.len(),
        drivers_dropped: enriched.dropped,
        vetted_rows: unfiltered.len(),
        driver_genes: genes.len(),
        unique_rows: unique.len(),
    };
    Ok((
        Reports {
            drivers,
            unfiltered,
            unique,
        },
        summary,
    ))
}

/// Build and write the reports, naming cohorts by file-name prefix.
pub fn run(inputs: &Inputs, config: &Config) -> Result<RunSummary> {
    run_with(inputs, config, &FirstDotPrefix)
}

pub fn run_with(inputs: &Inputs, config: &Config, namer: &dyn CohortNamer) -> Result<RunSummary> {
    let (reports, summary) = build_reports(inputs, config, namer)?;
    write_reports(&reports, &config.output_dir)?;
    info!(?summary, "reports written to {}", config.output_dir.display());
    Ok(summary)
}
