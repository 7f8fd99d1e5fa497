use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};
use tracing::info;

use super::open_typed;
use crate::schema::COHORT_INPUT;
use crate::table::SchemaError;

/// One cohort's metadata.
///
/// The file's `SAMPLES` column is the cohort-wide sample count; it is held as
/// `samples_cohort` so it never collides with per-gene sample counts. The
/// file's cohort-wide `MUTATIONS` column is not carried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CohortRecord {
    #[serde(rename = "COHORT")]
    pub cohort: String,
    #[serde(rename = "CANCER_TYPE")]
    pub cancer_type: String,
    #[serde(rename = "SAMPLES")]
    pub samples_cohort: Option<u64>,
}

/// Cohort metadata keyed by cohort id.
#[derive(Debug, Clone, Default)]
pub struct CohortTable {
    by_id: HashMap<String, CohortRecord>,
}

impl CohortTable {
    pub fn from_records<I>(records: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = CohortRecord>,
    {
        let mut by_id = HashMap::new();
        for rec in records {
            if by_id.contains_key(&rec.cohort) {
                return Err(SchemaError::DuplicateKey {
                    table: "cohorts".into(),
                    key: rec.cohort,
                });
            }
            by_id.insert(rec.cohort.clone(), rec);
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, cohort: &str) -> Option<&CohortRecord> {
        self.by_id.get(cohort)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Load the cohort metadata table.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_cohorts<P: AsRef<Path>>(path: P) -> Result<CohortTable> {
    let path = path.as_ref();
    let mut rdr = open_typed(path, COHORT_INPUT)?;

    let records = rdr
        .deserialize::<CohortRecord>()
        .enumerate()
        .map(|(idx, r)| r.with_context(|| format!("parsing {} at record {}", path.display(), idx)))
        .collect::<Result<Vec<_>>>()?;

    let table = CohortTable::from_records(records)
        .with_context(|| format!("indexing cohorts from {}", path.display()))?;
    info!(cohorts = table.len(), "loaded cohorts");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::testutil::write_file;
    use tempfile::tempdir;

    #[test]
    fn loads_and_renames_cohort_counts() -> Result<()> {
        let dir = tempdir()?;
        let path = write_file(
            &dir,
            "cohorts.tsv",
            "COHORT\tCANCER_TYPE\tPLATFORM\tSAMPLES\tMUTATIONS\n\
             COH1\tLUNG\tWXS\t100\t5000\n\
             COH2\tBREAST\tWGS\t50\t900\n",
        );
        let cohorts = load_cohorts(&path)?;
        assert_eq!(cohorts.len(), 2);
        assert_eq!(
            cohorts.get("COH1"),
            Some(&CohortRecord {
                cohort: "COH1".into(),
                cancer_type: "LUNG".into(),
                samples_cohort: Some(100),
            })
        );
        assert_eq!(cohorts.get("COH2").unwrap().samples_cohort, Some(50));
        assert!(cohorts.get("COH3").is_none());
        Ok(())
    }

    #[test]
    fn blank_sample_count_is_missing() -> Result<()> {
        let dir = tempdir()?;
        let path = write_file(&dir, "c.tsv", "COHORT\tCANCER_TYPE\tSAMPLES\nCOH1\tLUNG\t\n");
        let cohorts = load_cohorts(&path)?;
        assert_eq!(cohorts.get("COH1").unwrap().samples_cohort, None);
        Ok(())
    }

    #[test]
    fn comma_separated_file_fails_on_schema() -> Result<()> {
        let dir = tempdir()?;
        let path = write_file(&dir, "c.csv", "COHORT,CANCER_TYPE,SAMPLES\nCOH1,LUNG,10\n");
        let err = load_cohorts(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::MissingColumn { column, .. }) if column == "COHORT"
        ));
        Ok(())
    }

    #[test]
    fn duplicate_cohort_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = write_file(
            &dir,
            "c.tsv",
            "COHORT\tCANCER_TYPE\tSAMPLES\nCOH1\tLUNG\t10\nCOH1\tLUNG\t12\n",
        );
        let err = load_cohorts(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("COH1"));
        Ok(())
    }
}
