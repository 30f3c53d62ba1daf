//! Stable multi-key ordering.

use std::cmp::Ordering;

use crate::error::Result;
use crate::table::{Table, TableSpec};

impl Table {
    /// A copy of the table sorted by the given column specs.
    ///
    /// Each spec is a column name, optionally prefixed with `-` for
    /// descending order. Comparison is lexicographic over the specs,
    /// short-circuiting at the first unequal column; the sort is stable,
    /// so ties keep their input order. An empty spec list falls back to
    /// the primary key when one exists and is otherwise a plain copy.
    pub fn order_by(&self, specs: &[&str]) -> Result<Table> {
        let mut keys: Vec<(usize, bool)> = Vec::with_capacity(specs.len());
        if specs.is_empty() {
            if let Some(pk) = self.primary_key() {
                keys.push((self.column_index(pk)?, false));
            }
        }
        for spec in specs {
            let spec = spec.trim();
            let (name, descending) = match spec.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (spec, false),
            };
            keys.push((self.column_index(name)?, descending));
        }

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            for &(idx, descending) in &keys {
                let ord = a[idx].total_cmp(&b[idx]);
                let ord = if descending { ord.reverse() } else { ord };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });

        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            rows,
            ..Default::default()
        })
    }
}
