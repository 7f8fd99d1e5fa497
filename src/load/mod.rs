// src/load/mod.rs

pub mod cohorts;
pub mod mutations;

pub use cohorts::{load_cohorts, CohortRecord, CohortTable};
pub use mutations::{load_mutations, MutationKey, MutationRecord, MutationTable};

use csv::{Reader, ReaderBuilder, StringRecord};
use std::{fs::File, path::Path};

use anyhow::{Context, Result};

use crate::table::SchemaError;

/// Open a tab-separated file for typed reading and check its header against `required`.
pub(crate) fn open_typed(path: &Path, required: &[&str]) -> Result<Reader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(file);
    let headers = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .clone();
    check_headers(&headers, required, &path.display().to_string())?;
    Ok(rdr)
}

pub(crate) fn check_headers(headers: &StringRecord, required: &[&str], label: &str) -> Result<(), SchemaError> {
    match required.iter().find(|r| !headers.iter().any(|h| h == **r)) {
        Some(missing) => Err(SchemaError::MissingColumn {
            table: label.to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    /// Write `content` to `name` inside `dir`, returning the full path.
    pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}
