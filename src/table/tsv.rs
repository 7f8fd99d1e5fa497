// src/table/tsv.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::{fs::File, io::Read, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{SchemaError, Table};

/// Read a tab-separated file with a header row. Every cell is kept as text.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_tsv(file, &path.display().to_string())
}

/// Parse tab-separated text with a header row; `label` names the source in errors.
pub fn parse_tsv<R: Read>(reader: R, label: &str) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", label))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = Table::new(label, headers);
    let mut record = StringRecord::new();
    let mut idx = 0usize;
    while rdr
        .read_record(&mut record)
        .with_context(|| format!("TSV parse error in {} at record {}", label, idx))?
    {
        table.rows.push(record.iter().map(str::to_string).collect());
        idx += 1;
    }

    debug!(rows = table.len(), cols = table.headers.len(), "read {}", label);
    Ok(table)
}

/// Read a header-less tab-separated file, keeping only the fields at the given
/// positions under the given names. Any other fields on a line are ignored.
#[tracing::instrument(level = "debug", skip(path, columns), fields(path = %path.as_ref().display()))]
pub fn read_tsv_positional<P: AsRef<Path>>(path: P, columns: &[(usize, &str)]) -> Result<Table> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let file = File::open(path).with_context(|| format!("opening {}", label))?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut table = Table::new(
        label.clone(),
        columns.iter().map(|(_, name)| name.to_string()).collect(),
    );
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("TSV parse error in {} at record {}", label, idx))?;
        let mut row = Vec::with_capacity(columns.len());
        for &(position, name) in columns {
            let cell = record.get(position).ok_or_else(|| SchemaError::ShortRow {
                table: label.clone(),
                row: idx,
                found: record.len(),
                position,
                column: name.to_string(),
            })?;
            row.push(cell.to_string());
        }
        table.rows.push(row);
    }

    debug!(rows = table.len(), "read {}", label);
    Ok(table)
}

/// Write `table` as tab-separated text with a header row.
///
/// The file is written beside its destination and renamed into place, so a
/// reader never sees a half-written report.
pub fn write_tsv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    {
        let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(&mut tmp);
        wtr.write_record(&table.headers)
            .with_context(|| format!("writing header of {}", path.display()))?;
        for row in &table.rows {
            wtr.write_record(row)
                .with_context(|| format!("writing row of {}", path.display()))?;
        }
        wtr.flush()
            .with_context(|| format!("flushing {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("renaming temp file onto {}", path.display()))?;

    debug!(rows = table.len(), "wrote {}", path.display());
    Ok(())
}
