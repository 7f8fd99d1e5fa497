// src/collect/mod.rs

pub mod naming;

pub use naming::{CohortNamer, FirstDotPrefix};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::{COHORT, DRIVER_INPUT, VETTED_INPUT};
use crate::table::{read_tsv, Table};

/// One cohort's pair of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortFiles {
    pub drivers: PathBuf,
    pub vetted: PathBuf,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("no driver files given")]
    Empty,
    #[error("{drivers} driver files but {vetted} vetted files; each driver file needs exactly one vetted file")]
    LengthMismatch { drivers: usize, vetted: usize },
}

/// Split the single vetted-files argument on spaces. Empty fragments
/// (doubled or trailing spaces) are dropped.
pub fn split_vetted_arg(arg: &str) -> Vec<PathBuf> {
    arg.split(' ')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Pair driver files with vetted files by position.
pub fn pair_inputs(drivers: Vec<PathBuf>, vetted: Vec<PathBuf>) -> Result<Vec<CohortFiles>, PairingError> {
    if drivers.is_empty() {
        return Err(PairingError::Empty);
    }
    if drivers.len() != vetted.len() {
        return Err(PairingError::LengthMismatch {
            drivers: drivers.len(),
            vetted: vetted.len(),
        });
    }
    Ok(drivers
        .into_iter()
        .zip(vetted)
        .map(|(drivers, vetted)| CohortFiles { drivers, vetted })
        .collect())
}

/// The concatenated per-cohort tables.
#[derive(Debug, Clone)]
pub struct Collected {
    pub drivers: Table,
    pub vetted: Table,
}

/// Read every pair, tag vetted rows with their cohort and stack each kind
/// into one table, in input order.
pub fn collect(pairs: &[CohortFiles], namer: &dyn CohortNamer) -> Result<Collected> {
    let mut drivers = Vec::with_capacity(pairs.len());
    let mut vetted = Vec::with_capacity(pairs.len());

    for pair in pairs {
        drivers.push(read_drivers(&pair.drivers)?);
        vetted.push(read_vetted(&pair.vetted, namer)?);
    }

    let collected = Collected {
        drivers: Table::concat("drivers", drivers),
        vetted: Table::concat("vetted drivers", vetted),
    };
    info!(
        files = pairs.len(),
        drivers = collected.drivers.len(),
        vetted = collected.vetted.len(),
        "collected cohort results"
    );
    Ok(collected)
}

fn read_drivers(path: &Path) -> Result<Table> {
    let table = read_tsv(path).context("reading driver candidates")?;
    table.require_columns(DRIVER_INPUT)?;
    debug!(path = %path.display(), rows = table.len(), "driver candidates");
    Ok(table)
}

fn read_vetted(path: &Path, namer: &dyn CohortNamer) -> Result<Table> {
    let table = read_tsv(path).context("reading vetted drivers")?;
    table.require_columns(VETTED_INPUT)?;

    let cohort = if table.is_empty() {
        String::new()
    } else {
        namer.cohort_name(path)
    };
    debug!(path = %path.display(), rows = table.len(), cohort = %cohort, "vetted drivers");
    Ok(table.with_constant(COHORT, &cohort))
}
