// src/table/mod.rs

pub mod error;
pub mod tsv;

pub use error::SchemaError;
pub use tsv::{read_tsv, write_tsv};

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};

/// A fully materialised text table.
///
/// Cells are kept exactly as read; an empty cell is a missing value.
/// Every operation consumes the table and hands back a new one, so a
/// table is never observed half-transformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Where the table came from (a path or a stage name), used in errors.
    pub label: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(label: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            label: label.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, SchemaError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: self.label.clone(),
                column: name.to_string(),
            })
    }

    fn column_indices(&self, names: &[&str]) -> Result<Vec<usize>, SchemaError> {
        names.iter().map(|n| self.column_index(n)).collect()
    }

    /// Fails on the first column of `names` that the table lacks.
    pub fn require_columns(&self, names: &[&str]) -> Result<(), SchemaError> {
        self.column_indices(names).map(|_| ())
    }

    /// Iterate one column's cells in row order.
    pub fn column<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a str> + 'a, SchemaError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |r| r[idx].as_str()))
    }

    /// Set `name` to `value` on every row, replacing the column if it exists.
    pub fn with_constant(mut self, name: &str, value: &str) -> Self {
        match self.headers.iter().position(|h| h == name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
        self
    }

    /// Append a column computed from each row.
    pub fn with_derived<F>(mut self, name: &str, mut derive: F) -> Result<Self, SchemaError>
    where
        F: FnMut(&[String]) -> String,
    {
        if self.has_column(name) {
            return Err(SchemaError::ColumnCollision {
                table: self.label.clone(),
                column: name.to_string(),
            });
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            let value = derive(row.as_slice());
            row.push(value);
        }
        Ok(self)
    }

    /// Left join against a keyed lookup.
    ///
    /// Every row is kept. `lookup` receives the row's `keys` cells and returns
    /// the values for `attach`, in order; a row with no match gets empty cells.
    pub fn left_join<F>(mut self, keys: &[&str], attach: &[&str], lookup: F) -> Result<Self, SchemaError>
    where
        F: Fn(&[&str]) -> Option<Vec<String>>,
    {
        let key_idx = self.column_indices(keys)?;
        if let Some(existing) = attach.iter().find(|a| self.has_column(a)) {
            return Err(SchemaError::ColumnCollision {
                table: self.label.clone(),
                column: existing.to_string(),
            });
        }

        let mut key_buf: Vec<&str> = Vec::with_capacity(key_idx.len());
        let mut joined: Vec<Option<Vec<String>>> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            key_buf.clear();
            key_buf.extend(key_idx.iter().map(|&i| row[i].as_str()));
            joined.push(lookup(key_buf.as_slice()));
        }

        self.headers.extend(attach.iter().map(|a| a.to_string()));
        for (row, values) in self.rows.iter_mut().zip(joined) {
            match values {
                Some(values) => {
                    debug_assert_eq!(values.len(), attach.len());
                    row.extend(values);
                }
                None => row.extend(std::iter::repeat(String::new()).take(attach.len())),
            }
        }
        Ok(self)
    }

    /// Keep only rows for which `keep` holds, preserving order.
    pub fn filter_rows<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|r| keep(r.as_slice()));
        self
    }

    /// Project onto `names`, in that order.
    pub fn select(&self, names: &[&str]) -> Result<Self, SchemaError> {
        let idx = self.column_indices(names)?;
        Ok(Self {
            label: self.label.clone(),
            headers: names.iter().map(|n| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| idx.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        })
    }

    /// Stable ascending sort on `names`, compared left to right.
    /// Text compares lexicographically; empty cells sort after everything else.
    pub fn sorted_by(mut self, names: &[&str]) -> Result<Self, SchemaError> {
        let idx = self.column_indices(names)?;
        self.rows.sort_by(|a, b| {
            idx.iter()
                .map(|&i| compare_cells(&a[i], &b[i]))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(self)
    }

    /// Drop exact duplicate rows, keeping the first occurrence.
    pub fn deduplicated(mut self) -> Self {
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|r| seen.insert(r.clone()));
        self
    }

    /// Stack tables vertically, preserving input order and row order.
    ///
    /// Columns are aligned by name. The result carries the union of all
    /// headers in first-seen order; a table lacking a column contributes
    /// empty cells for it.
    pub fn concat<I>(label: impl Into<String>, tables: I) -> Self
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();

        let mut headers: Vec<String> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();
        for t in &tables {
            for h in &t.headers {
                if !position.contains_key(h) {
                    position.insert(h.clone(), headers.len());
                    headers.push(h.clone());
                }
            }
        }

        let total = tables.iter().map(Table::len).sum();
        let mut rows = Vec::with_capacity(total);
        for t in tables {
            let targets: Vec<usize> = t.headers.iter().map(|h| position[h]).collect();
            let aligned = targets.iter().enumerate().all(|(i, &p)| i == p) && targets.len() == headers.len();
            for row in t.rows {
                if aligned {
                    rows.push(row);
                    continue;
                }
                let mut out = vec![String::new(); headers.len()];
                for (cell, &p) in row.into_iter().zip(&targets) {
                    out[p] = cell;
                }
                rows.push(out);
            }
        }

        Self {
            label: label.into(),
            headers,
            rows,
        }
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            label: "t".into(),
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn select_reorders_and_reports_missing_column() {
        let t = table(&["A", "B", "C"], &[&["1", "2", "3"]]);
        let s = t.select(&["C", "A"]).unwrap();
        assert_eq!(s.headers, vec!["C", "A"]);
        assert_eq!(s.rows, vec![vec!["3", "1"]]);

        let err = t.select(&["A", "Z"]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                table: "t".into(),
                column: "Z".into()
            }
        );
    }

    #[test]
    fn sort_is_stable_and_puts_empty_last() {
        let t = table(
            &["SYMBOL", "TYPE", "N"],
            &[
                &["TP53", "", "1"],
                &["KRAS", "LUNG", "2"],
                &["TP53", "BREAST", "3"],
                &["KRAS", "LUNG", "4"],
                &["", "LUNG", "5"],
            ],
        );
        let sorted = t.sorted_by(&["SYMBOL", "TYPE"]).unwrap();
        let order: Vec<&str> = sorted.column("N").unwrap().collect();
        assert_eq!(order, vec!["2", "4", "3", "1", "5"]);
    }

    #[test]
    fn left_join_keeps_unmatched_rows_with_empty_cells() {
        let t = table(&["K", "V"], &[&["a", "1"], &["b", "2"]]);
        let joined = t
            .left_join(&["K"], &["X", "Y"], |k| {
                (k[0] == "a").then(|| vec!["x".to_string(), "y".to_string()])
            })
            .unwrap();
        assert_eq!(joined.headers, vec!["K", "V", "X", "Y"]);
        assert_eq!(joined.rows[0], vec!["a", "1", "x", "y"]);
        assert_eq!(joined.rows[1], vec!["b", "2", "", ""]);
    }

    #[test]
    fn left_join_refuses_to_overwrite_a_column() {
        let t = table(&["K", "X"], &[&["a", "1"]]);
        let err = t.left_join(&["K"], &["X"], |_| None).unwrap_err();
        assert!(matches!(err, SchemaError::ColumnCollision { column, .. } if column == "X"));
    }

    #[test]
    fn concat_aligns_columns_by_name_and_keeps_order() {
        let a = table(&["A", "B"], &[&["a1", "b1"], &["a2", "b2"]]);
        let b = table(&["B", "A", "C"], &[&["b3", "a3", "c3"]]);
        let c = Table::concat("all", vec![a, b]);
        assert_eq!(c.headers, vec!["A", "B", "C"]);
        assert_eq!(
            c.rows,
            vec![
                vec!["a1", "b1", ""],
                vec!["a2", "b2", ""],
                vec!["a3", "b3", "c3"],
            ]
        );
    }

    #[test]
    fn deduplicated_keeps_first_occurrence() {
        let t = table(&["A", "B"], &[&["1", "x"], &["2", "y"], &["1", "x"], &["1", "z"]]);
        let d = t.deduplicated();
        assert_eq!(d.rows, vec![vec!["1", "x"], vec!["2", "y"], vec!["1", "z"]]);
    }

    #[test]
    fn with_constant_replaces_existing_column() {
        let t = table(&["A", "COHORT"], &[&["1", "old"]]);
        let t = t.with_constant("COHORT", "new");
        assert_eq!(t.headers, vec!["A", "COHORT"]);
        assert_eq!(t.rows[0], vec!["1", "new"]);
    }
}
