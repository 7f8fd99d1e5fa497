// src/enrich/mod.rs

use anyhow::{Context, Result};
use tracing::info;

use crate::load::{CohortTable, MutationTable};
use crate::schema::{
    CANCER_TYPE, COHORT, MUTATIONS, SAMPLES, SAMPLES_COHORT, SAMPLE_FRACTION, SYMBOL, TRANSCRIPT,
};
use crate::table::{SchemaError, Table};

/// Attach cancer type and cohort sample count by cohort id. Rows of unknown
/// cohorts are kept with both cells empty.
pub fn join_cohorts(table: Table, cohorts: &CohortTable) -> Result<Table, SchemaError> {
    table.left_join(&[COHORT], &[CANCER_TYPE, SAMPLES_COHORT], |key| {
        cohorts.get(key[0]).map(|c| {
            vec![
                c.cancer_type.clone(),
                c.samples_cohort.map(|n| n.to_string()).unwrap_or_default(),
            ]
        })
    })
}

/// Attach the mutation count by (transcript, symbol, cohort). Rows without a
/// count are kept with an empty cell.
pub fn join_mutations(table: Table, mutations: &MutationTable) -> Result<Table, SchemaError> {
    table.left_join(&[TRANSCRIPT, SYMBOL, COHORT], &[MUTATIONS], |key| {
        mutations
            .get(key[0], key[1], key[2])
            .map(|n| vec![n.to_string()])
    })
}

/// `samples / samples_cohort`, or `None` when either side is blank or not a
/// number, or the quotient is not finite (a zero cohort size).
pub fn sample_fraction(samples: &str, samples_cohort: &str) -> Option<f64> {
    let numerator: f64 = samples.trim().parse().ok()?;
    let denominator: f64 = samples_cohort.trim().parse().ok()?;
    let fraction = numerator / denominator;
    fraction.is_finite().then_some(fraction)
}

/// Append the per-row sample fraction. Every row gets a cell; rows where the
/// fraction is undefined get an empty one.
pub fn add_sample_fraction(table: Table) -> Result<Table, SchemaError> {
    let samples = table.column_index(SAMPLES)?;
    let samples_cohort = table.column_index(SAMPLES_COHORT)?;
    table.with_derived(SAMPLE_FRACTION, |row| {
        sample_fraction(&row[samples], &row[samples_cohort])
            .map(|f| f.to_string())
            .unwrap_or_default()
    })
}

/// Drop rows that found no mutation count. Returns the kept table and the
/// number of rows dropped.
pub fn drop_missing_mutations(table: Table) -> Result<(Table, usize), SchemaError> {
    let idx = table.column_index(MUTATIONS)?;
    let before = table.len();
    let kept = table.filter_rows(|row| !row[idx].is_empty());
    let dropped = before - kept.len();
    Ok((kept, dropped))
}

/// Driver candidates after enrichment.
#[derive(Debug, Clone)]
pub struct EnrichedDrivers {
    pub table: Table,
    /// Rows removed because no mutation count matched.
    pub dropped: usize,
}

/// Cohort join, mutation join, sample fraction, then the mutation filter.
/// The fraction is computed before filtering so every input row gets one.
pub fn enrich_drivers(
    drivers: Table,
    cohorts: &CohortTable,
    mutations: &MutationTable,
) -> Result<EnrichedDrivers> {
    let table = join_cohorts(drivers, cohorts).context("joining drivers with cohorts")?;
    let table = join_mutations(table, mutations).context("joining drivers with mutations")?;
    let table = add_sample_fraction(table).context("computing sample fraction")?;
    let (table, dropped) = drop_missing_mutations(table)?;

    info!(kept = table.len(), dropped, "drivers enriched");
    Ok(EnrichedDrivers { table, dropped })
}

/// Same joins as the driver pipeline; every vetted row is kept.
pub fn enrich_vetted(vetted: Table, cohorts: &CohortTable, mutations: &MutationTable) -> Result<Table> {
    let table = join_cohorts(vetted, cohorts).context("joining vetted drivers with cohorts")?;
    let table = join_mutations(table, mutations).context("joining vetted drivers with mutations")?;
    info!(rows = table.len(), "vetted drivers enriched");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{CohortRecord, MutationRecord};

    fn cohorts() -> CohortTable {
        CohortTable::from_records(vec![
            CohortRecord {
                cohort: "COH1".into(),
                cancer_type: "LUNG".into(),
                samples_cohort: Some(100),
            },
            CohortRecord {
                cohort: "COH2".into(),
                cancer_type: "BREAST".into(),
                samples_cohort: Some(50),
            },
            CohortRecord {
                cohort: "COH0".into(),
                cancer_type: "SKIN".into(),
                samples_cohort: Some(0),
            },
        ])
        .unwrap()
    }

    fn mutations() -> MutationTable {
        let rec = |t: &str, s: &str, c: &str, n: u64| MutationRecord {
            chromosome: Some("17".into()),
            transcript: t.into(),
            symbol: s.into(),
            cohort: c.into(),
            samples: Some(n),
        };
        MutationTable::aggregate(vec![
            rec("ENST1", "TP53", "COH1", 40),
            rec("ENST1", "TP53", "COH2", 15),
            rec("ENST1", "TP53", "COH0", 1),
        ])
    }

    /// SYMBOL, TRANSCRIPT, COHORT, SAMPLES
    fn drivers(rows: &[[&str; 4]]) -> Table {
        let mut t = Table::new(
            "drivers",
            vec![SYMBOL.into(), TRANSCRIPT.into(), COHORT.into(), SAMPLES.into()],
        );
        t.rows = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        t
    }

    fn cell<'a>(t: &'a Table, row: usize, col: &str) -> &'a str {
        &t.rows[row][t.column_index(col).unwrap()]
    }

    #[test]
    fn fraction_is_exact_where_defined() {
        assert_eq!(sample_fraction("20", "100"), Some(0.2));
        assert_eq!(sample_fraction("10", "50"), Some(0.2));
        assert_eq!(sample_fraction("3", "4.0"), Some(0.75));
        assert_eq!(sample_fraction("20", ""), None);
        assert_eq!(sample_fraction("", "100"), None);
        assert_eq!(sample_fraction("20", "0"), None);
        assert_eq!(sample_fraction("0", "0"), None);
        assert_eq!(sample_fraction("n/a", "10"), None);
    }

    #[test]
    fn driver_pipeline_joins_and_filters() -> Result<()> {
        let input = drivers(&[
            ["TP53", "ENST1", "COH1", "20"],
            ["TP53", "ENST1", "COH2", "10"],
            ["KRAS", "ENST2", "COH1", "5"],
        ]);
        let out = enrich_drivers(input, &cohorts(), &mutations())?;
        assert_eq!(out.dropped, 1);
        assert_eq!(out.table.len(), 2);

        assert_eq!(cell(&out.table, 0, CANCER_TYPE), "LUNG");
        assert_eq!(cell(&out.table, 0, MUTATIONS), "40");
        assert_eq!(cell(&out.table, 0, SAMPLE_FRACTION), "0.2");
        assert_eq!(cell(&out.table, 1, CANCER_TYPE), "BREAST");
        assert_eq!(cell(&out.table, 1, MUTATIONS), "15");
        assert_eq!(cell(&out.table, 1, SAMPLE_FRACTION), "0.2");
        Ok(())
    }

    #[test]
    fn unknown_or_empty_cohort_keeps_row_with_blank_fraction() -> Result<()> {
        let muts = MutationTable::aggregate(vec![MutationRecord {
            chromosome: None,
            transcript: "ENST1".into(),
            symbol: "TP53".into(),
            cohort: "COH9".into(),
            samples: Some(2),
        }]);
        let input = drivers(&[["TP53", "ENST1", "COH9", "20"], ["TP53", "ENST1", "COH0", "1"]]);
        let out = enrich_drivers(input, &cohorts(), &muts)?;

        assert_eq!(out.table.len(), 1);
        assert_eq!(cell(&out.table, 0, COHORT), "COH9");
        assert_eq!(cell(&out.table, 0, CANCER_TYPE), "");
        assert_eq!(cell(&out.table, 0, SAMPLE_FRACTION), "");
        assert_eq!(cell(&out.table, 0, MUTATIONS), "2");
        Ok(())
    }

    #[test]
    fn zero_cohort_size_gives_blank_fraction() -> Result<()> {
        let input = drivers(&[["TP53", "ENST1", "COH0", "1"]]);
        let out = enrich_drivers(input, &cohorts(), &mutations())?;
        assert_eq!(out.table.len(), 1);
        assert_eq!(cell(&out.table, 0, SAMPLE_FRACTION), "");
        Ok(())
    }

    #[test]
    fn survivors_all_have_a_mutation_record() -> Result<()> {
        let muts = mutations();
        let input = drivers(&[
            ["TP53", "ENST1", "COH1", "1"],
            ["TP53", "ENST9", "COH1", "1"],
            ["TP53", "ENST1", "COH3", "1"],
            ["EGFR", "ENST1", "COH2", "1"],
            ["TP53", "ENST1", "COH2", "1"],
        ]);
        let n_in = input.len();
        let out = enrich_drivers(input, &cohorts(), &muts)?;

        assert!(out.table.len() <= n_in);
        assert_eq!(out.table.len() + out.dropped, n_in);
        for i in 0..out.table.len() {
            let count = muts.get(
                cell(&out.table, i, TRANSCRIPT),
                cell(&out.table, i, SYMBOL),
                cell(&out.table, i, COHORT),
            );
            assert_eq!(count.map(|n| n.to_string()).as_deref(), Some(cell(&out.table, i, MUTATIONS)));
        }
        Ok(())
    }

    #[test]
    fn vetted_pipeline_keeps_every_row() -> Result<()> {
        let mut input = drivers(&[["TP53", "ENST1", "COH1", "20"], ["NOPE", "ENST7", "", "1"]]);
        input.label = "vetted".into();
        let out = enrich_vetted(input, &cohorts(), &mutations())?;
        assert_eq!(out.len(), 2);
        assert!(!out.has_column(SAMPLE_FRACTION));
        assert_eq!(cell(&out, 0, SAMPLES_COHORT), "100");
        assert_eq!(cell(&out, 1, MUTATIONS), "");
        assert_eq!(cell(&out, 1, CANCER_TYPE), "");
        Ok(())
    }

    #[test]
    fn input_that_already_has_cancer_type_is_rejected() {
        let mut input = drivers(&[["TP53", "ENST1", "COH1", "20"]]);
        input = input.with_constant(CANCER_TYPE, "LUNG");
        let err = enrich_drivers(input, &cohorts(), &mutations()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SchemaError>(),
            Some(SchemaError::ColumnCollision { column, .. }) if column == CANCER_TYPE
        ));
    }
}
