// src/config.rs

use anyhow::{bail, Result};
use std::{env, path::PathBuf};

use crate::collect::CohortFiles;

/// Environment variable naming the dataset base directory.
pub const DATASETS_ENV: &str = "INTOGEN_DATASETS";

/// Gene annotation table, relative to the dataset base directory.
pub const REFERENCE_SUBPATH: [&str; 2] = ["regions", "cds_biomart.tsv"];

/// A named field read from a fixed position of a header-less table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalColumn {
    pub position: usize,
    pub name: &'static str,
}

/// Fields kept from the gene annotation table. Lines look like
/// `ENSG00000160752 FDPS ENSP00000349078 1 155312255 ... ENST00000356657`;
/// every position not listed here is ignored.
pub const REFERENCE_LAYOUT: [PositionalColumn; 4] = [
    PositionalColumn { position: 0, name: "ENSEMBL_GENE" },
    PositionalColumn { position: 1, name: "SYMBOL" },
    PositionalColumn { position: 2, name: "ENSEMBL_PROTEIN" },
    PositionalColumn { position: 10, name: "ENSEMBL_TRANSCRIPT" },
];

/// Where the run reads shared datasets from and writes its reports to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub datasets_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn new(datasets_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            datasets_dir: datasets_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Dataset directory from `INTOGEN_DATASETS`, reports to the working directory.
    pub fn from_env() -> Result<Self> {
        match env::var_os(DATASETS_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir, ".")),
            _ => bail!("{} is not set; it must name the datasets directory", DATASETS_ENV),
        }
    }

    pub fn reference_path(&self) -> PathBuf {
        REFERENCE_SUBPATH
            .iter()
            .fold(self.datasets_dir.clone(), |p, part| p.join(part))
    }
}

/// All input files of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub mutations: PathBuf,
    pub cohorts: PathBuf,
    pub pairs: Vec<CohortFiles>,
}
