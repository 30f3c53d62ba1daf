//! Row- and column-shaping operators: project, restrict, rename, extend,
//! update, limit.

use crate::error::Result;
use crate::row::Row;
use crate::table::{Table, TableSpec};

impl Table {
    /// A new table holding only the requested columns, in the requested
    /// order. Names are trimmed and matched case-insensitively; the
    /// primary key survives only if it is among them.
    pub fn project(&self, columns: &[&str]) -> Result<Table> {
        let names: Vec<String> = columns.iter().map(|c| c.trim().to_string()).collect();
        let mut indices = Vec::with_capacity(names.len());
        for name in &names {
            indices.push(self.column_index(name)?);
        }
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        let primary_key = self.primary_key.clone().filter(|pk| {
            let lower = pk.to_lowercase();
            names.iter().any(|n| n.to_lowercase() == lower)
        });
        Table::build(TableSpec {
            columns: Some(names),
            primary_key,
            rows,
            ..Default::default()
        })
    }

    /// A new table restricted to the rows the predicate accepts.
    pub fn restrict<F>(&self, predicate: F) -> Result<Table>
    where
        F: Fn(&Row<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(&Row::borrowed(&self.columns, row)))
            .cloned()
            .collect();
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows,
            ..Default::default()
        })
    }

    /// A new table with columns renamed per the `(old, new)` mapping.
    /// Old names match case-insensitively; unmatched entries are ignored.
    /// A renamed primary key is tracked to its new name.
    pub fn rename(&self, mapping: &[(&str, &str)]) -> Result<Table> {
        let lowered: Vec<(String, &str)> = mapping
            .iter()
            .map(|(old, new)| (old.to_lowercase(), *new))
            .collect();
        let renamed = |name: &str| -> Option<String> {
            let lower = name.to_lowercase();
            lowered
                .iter()
                .find(|(old, _)| *old == lower)
                .map(|(_, new)| new.to_string())
        };
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| renamed(c).unwrap_or_else(|| c.clone()))
            .collect();
        let primary_key = self
            .primary_key
            .as_ref()
            .map(|pk| renamed(pk).unwrap_or_else(|| pk.clone()));
        Table::build(TableSpec {
            columns: Some(columns),
            primary_key,
            rows: self.rows.clone(),
            ..Default::default()
        })
    }

    /// A new table with the columns returned by `f` appended to every row.
    ///
    /// `f` receives each row and returns a row holding only the *new*
    /// columns and their values. The first invocation's column set defines
    /// the widened schema; `f` must return the same columns for every row
    /// (a later arity drift fails the result construction).
    pub fn extend<F>(&self, f: F) -> Result<Table>
    where
        F: Fn(&Row<'_>) -> Row<'static>,
    {
        let mut added: Option<Vec<String>> = None;
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let ext = f(&Row::borrowed(&self.columns, row));
            if added.is_none() {
                added = Some(ext.columns().to_vec());
            }
            let mut new_row = row.clone();
            new_row.extend(ext.into_values());
            rows.push(new_row);
        }
        let mut columns = self.columns.clone();
        columns.extend(added.unwrap_or_default());
        Table::build(TableSpec {
            columns: Some(columns),
            primary_key: self.primary_key.clone(),
            rows,
            ..Default::default()
        })
    }

    /// A new table with `f` applied to every row. `f` returns the full
    /// replacement row over the same columns; key uniqueness is
    /// re-validated by the result construction.
    pub fn update<F>(&self, f: F) -> Result<Table>
    where
        F: Fn(&Row<'_>) -> Row<'static>,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| f(&Row::borrowed(&self.columns, row)).into_values())
            .collect();
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows,
            ..Default::default()
        })
    }

    /// The first `n` rows, keeping name, columns, and key.
    pub fn limit(&self, n: usize) -> Result<Table> {
        Table::build(TableSpec {
            name: self.name.clone(),
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
            ..Default::default()
        })
    }
}
