// src/emit/mod.rs

pub mod reference;

pub use reference::{load_reference, unique_drivers};

use anyhow::{Context, Result};
use std::{collections::BTreeSet, path::Path};
use tracing::info;

use crate::schema::{DRIVER_OUTPUT, REPORT_SORT, SYMBOL, VETTED_OUTPUT};
use crate::table::{write_tsv, SchemaError, Table};

pub const DRIVERS_FILE: &str = "drivers.tsv";
pub const UNFILTERED_DRIVERS_FILE: &str = "unfiltered_drivers.tsv";
pub const UNIQUE_DRIVERS_FILE: &str = "unique_drivers.tsv";

/// The three finished report tables.
#[derive(Debug, Clone)]
pub struct Reports {
    pub drivers: Table,
    pub unfiltered: Table,
    pub unique: Table,
}

/// Fixed driver layout, sorted by symbol then cancer type.
pub fn driver_report(enriched: &Table) -> Result<Table, SchemaError> {
    enriched.select(&DRIVER_OUTPUT)?.sorted_by(REPORT_SORT)
}

/// Fixed vetted layout, sorted by symbol then cancer type.
pub fn vetted_report(enriched: &Table) -> Result<Table, SchemaError> {
    enriched.select(&VETTED_OUTPUT)?.sorted_by(REPORT_SORT)
}

/// Distinct non-blank symbols of the driver report.
pub fn driver_genes(report: &Table) -> Result<BTreeSet<String>, SchemaError> {
    Ok(report
        .column(SYMBOL)?
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write all three reports into `dir`.
pub fn write_reports(reports: &Reports, dir: &Path) -> Result<()> {
    for (table, name) in [
        (&reports.drivers, DRIVERS_FILE),
        (&reports.unfiltered, UNFILTERED_DRIVERS_FILE),
        (&reports.unique, UNIQUE_DRIVERS_FILE),
    ] {
        let path = dir.join(name);
        write_tsv(table, &path).with_context(|| format!("writing {}", name))?;
        info!(rows = table.len(), path = %path.display(), "wrote report");
    }
    Ok(())
}
