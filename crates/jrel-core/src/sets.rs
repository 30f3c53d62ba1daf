//! Set algebra over tables with identical column lists.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::table::{Table, TableSpec};
use crate::value::Value;

impl Table {
    fn require_same_columns(&self, other: &Table) -> Result<()> {
        if self.columns == other.columns {
            Ok(())
        } else {
            Err(Error::SchemaMismatch)
        }
    }

    /// The union of two tables with identical column lists.
    ///
    /// Without a primary key the result is deduplicated by exact row
    /// content, first-seen order, self's rows first. With a primary key,
    /// rows of `other` under an unseen key are appended; an identical row
    /// under a seen key is skipped; a differing row under a seen key is a
    /// [`Error::DuplicateKeyConflict`]. A key appended earlier in the same
    /// union counts as seen.
    pub fn union(&self, other: &Table) -> Result<Table> {
        self.require_same_columns(other)?;

        if let Some(pk) = self.primary_key.clone() {
            let idx = self.column_index(&pk)?;
            let mut rows = self.rows.clone();
            let mut seen: HashMap<crate::value::Key, usize> = self
                .rows
                .iter()
                .enumerate()
                .map(|(i, r)| (r[idx].key(), i))
                .collect();
            for row in &other.rows {
                match seen.get(&row[idx].key()) {
                    None => {
                        seen.insert(row[idx].key(), rows.len());
                        rows.push(row.clone());
                    }
                    Some(&at) if rows[at] == *row => {}
                    Some(_) => {
                        return Err(Error::DuplicateKeyConflict(row[idx].to_string()));
                    }
                }
            }
            return Table::build(TableSpec {
                columns: Some(self.columns.clone()),
                primary_key: Some(pk),
                rows,
                ..Default::default()
            });
        }

        let mut rows: Vec<Vec<Value>> = Vec::new();
        for row in self.rows.iter().chain(other.rows.iter()) {
            if !rows.contains(row) {
                rows.push(row.clone());
            }
        }
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            rows,
            ..Default::default()
        })
    }

    /// Rows present, by exact content, in both tables. Order and
    /// duplicates follow `self`; the primary key is preserved.
    pub fn intersect(&self, other: &Table) -> Result<Table> {
        self.require_same_columns(other)?;
        let rows = self
            .rows
            .iter()
            .filter(|r| other.rows.contains(r))
            .cloned()
            .collect();
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows,
            ..Default::default()
        })
    }

    /// Rows of `self` absent, by exact content, from `other`. Order
    /// follows `self`; the primary key is preserved.
    pub fn minus(&self, other: &Table) -> Result<Table> {
        self.require_same_columns(other)?;
        let rows = self
            .rows
            .iter()
            .filter(|r| !other.rows.contains(r))
            .cloned()
            .collect();
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows,
            ..Default::default()
        })
    }

    /// Removes duplicate rows, keeping the first occurrence. A table with
    /// a primary key is duplicate-free by construction, so this is a copy.
    pub fn distinct(&self) -> Result<Table> {
        if self.primary_key.is_some() {
            return Ok(self.clone());
        }
        let mut rows: Vec<Vec<Value>> = Vec::new();
        for row in &self.rows {
            if !rows.contains(row) {
                rows.push(row.clone());
            }
        }
        Table::build(TableSpec {
            columns: Some(self.columns.clone()),
            rows,
            ..Default::default()
        })
    }

    /// Whether every row of `self` also appears in `other`.
    pub fn is_subset(&self, other: &Table) -> Result<bool> {
        self.require_same_columns(other)?;
        Ok(self.rows.iter().all(|r| other.rows.contains(r)))
    }

    /// Whether every row of `other` also appears in `self`.
    pub fn is_superset(&self, other: &Table) -> Result<bool> {
        other.is_subset(self)
    }

    /// Rows in exactly one of the two tables.
    pub fn symmetric_difference(&self, other: &Table) -> Result<Table> {
        self.minus(other)?.union(&other.minus(self)?)
    }
}
