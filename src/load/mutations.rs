use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info};

use super::open_typed;
use crate::schema::MUTATION_INPUT;

/// One raw mutation line. Only the fields needed for counting are read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationRecord {
    /// Chromosome names such as `01` or `X` stay text.
    #[serde(rename = "CHR", default)]
    pub chromosome: Option<String>,
    #[serde(rename = "TRANSCRIPT")]
    pub transcript: String,
    #[serde(rename = "SYMBOL")]
    pub symbol: String,
    #[serde(rename = "COHORT")]
    pub cohort: String,
    #[serde(rename = "SAMPLES")]
    pub samples: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationKey {
    pub transcript: String,
    pub symbol: String,
    pub cohort: String,
}

impl MutationKey {
    pub fn new(transcript: &str, symbol: &str, cohort: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            symbol: symbol.to_string(),
            cohort: cohort.to_string(),
        }
    }
}

/// Mutation counts per (transcript, symbol, cohort).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationTable {
    counts: BTreeMap<MutationKey, u64>,
}

impl MutationTable {
    /// Sum `samples` over every record sharing a key.
    ///
    /// Records with a blank key field take part in no group. A blank sample
    /// count adds nothing to its group.
    pub fn aggregate<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MutationRecord>,
    {
        let mut counts: BTreeMap<MutationKey, u64> = BTreeMap::new();
        let mut skipped = 0usize;
        for rec in records {
            if rec.transcript.is_empty() || rec.symbol.is_empty() || rec.cohort.is_empty() {
                skipped += 1;
                continue;
            }
            let key = MutationKey {
                transcript: rec.transcript,
                symbol: rec.symbol,
                cohort: rec.cohort,
            };
            *counts.entry(key).or_insert(0) += rec.samples.unwrap_or(0);
        }
        if skipped > 0 {
            debug!(skipped, "mutation records with a blank key");
        }
        Self { counts }
    }

    pub fn get(&self, transcript: &str, symbol: &str, cohort: &str) -> Option<u64> {
        self.counts
            .get(&MutationKey::new(transcript, symbol, cohort))
            .copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MutationKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Load the raw mutation table and count mutations per (transcript, symbol, cohort).
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_mutations<P: AsRef<Path>>(path: P) -> Result<MutationTable> {
    let path = path.as_ref();
    let mut rdr = open_typed(path, MUTATION_INPUT)?;

    let records = rdr
        .deserialize::<MutationRecord>()
        .enumerate()
        .map(|(idx, r)| r.with_context(|| format!("parsing {} at record {}", path.display(), idx)))
        .collect::<Result<Vec<_>>>()?;
    let n_records = records.len();

    let table = MutationTable::aggregate(records);
    info!(records = n_records, groups = table.len(), "loaded mutations");
    Ok(table)
}
