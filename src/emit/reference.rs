use anyhow::{Context, Result};
use std::{collections::BTreeSet, path::Path};
use tracing::info;

use crate::config::REFERENCE_LAYOUT;
use crate::schema::SYMBOL;
use crate::table::{tsv::read_tsv_positional, SchemaError, Table};

/// Read the header-less gene annotation table, keeping only the columns named
/// in [`REFERENCE_LAYOUT`].
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let columns: Vec<(usize, &str)> = REFERENCE_LAYOUT
        .iter()
        .map(|c| (c.position, c.name))
        .collect();
    read_tsv_positional(path, &columns)
        .with_context(|| format!("reading gene annotation {}", path.display()))
}

/// Reference rows whose symbol is one of `genes`, without exact duplicates.
/// Reference order is kept.
pub fn unique_drivers(reference: Table, genes: &BTreeSet<String>) -> Result<Table, SchemaError> {
    let symbol = reference.column_index(SYMBOL)?;
    let table = reference
        .filter_rows(|row| genes.contains(&row[symbol]))
        .deduplicated();
    info!(genes = genes.len(), rows = table.len(), "unique driver annotations");
    Ok(table)
}
