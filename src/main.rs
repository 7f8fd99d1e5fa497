use anyhow::{Context, Result};
use clap::Parser;
use driversummary::{
    collect::{pair_inputs, split_vetted_arg},
    pipeline, Config, Inputs,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Merge per-cohort driver results into summary report tables.
#[derive(Parser, Debug)]
#[command(name = "driversummary", version, about, long_about = None)]
struct Cli {
    /// Aggregated mutation table (TSV).
    #[arg(long)]
    mutations: PathBuf,

    /// Cohort metadata table (TSV).
    #[arg(long)]
    cohorts: PathBuf,

    /// Dataset base directory holding regions/cds_biomart.tsv.
    #[arg(long, env = "INTOGEN_DATASETS")]
    datasets: PathBuf,

    /// Directory the reports are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Driver-candidate files, then one argument listing the vetted files
    /// separated by spaces, in the same order.
    #[arg(required = true, num_args = 2.., value_name = "FILES")]
    files: Vec<String>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve inputs & config ──────────────────────────────────
    let cli = Cli::parse();
    let mut files = cli.files;
    let vetted_arg = files.pop().context("missing vetted files argument")?;
    let drivers: Vec<PathBuf> = files.into_iter().map(PathBuf::from).collect();
    let pairs = pair_inputs(drivers, split_vetted_arg(&vetted_arg))?;
    info!(cohorts = pairs.len(), "startup");

    let inputs = Inputs {
        mutations: cli.mutations,
        cohorts: cli.cohorts,
        pairs,
    };
    let config = Config::new(cli.datasets, cli.output_dir);

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = pipeline::run(&inputs, &config)?;
    info!(
        drivers = summary.drivers_kept,
        dropped = summary.drivers_dropped,
        unfiltered = summary.vetted_rows,
        unique = summary.unique_rows,
        "all done"
    );
    Ok(())
}
