//! The immutable table value and its single construction path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::row::Row;
use crate::value::{Key, Value};

/// Version tag written into freshly built table descriptions.
pub const CURRENT_TABLE_VERSION: u32 = 1;

/// Structural description of a table: the canonical JSON shape, and the
/// only input [`Table::build`] accepts.
///
/// `rows` is required. `columns`, when absent, is synthesized as
/// `c0..cN-1` from the first row, which must then be non-empty.
/// Field declaration order fixes the emitted JSON field order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(rename = "primary key", skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    pub rows: Vec<Vec<Value>>,
}

/// An immutable relational table: an ordered column schema, a row matrix,
/// and an optional unique primary key with an O(1) lookup index.
///
/// A table is fully validated and indexed during [`Table::build`] and never
/// mutated afterwards; every operator returns a brand-new table built
/// through the same path.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) name: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) version: u32,
    pub(crate) columns: Vec<String>,
    /// Lowercased column name -> index. With duplicate case-insensitive
    /// names the most recently bound index wins, as in the source data.
    pub(crate) lookup: HashMap<String, usize>,
    pub(crate) rows: Vec<Vec<Value>>,
    pub(crate) primary_key: Option<String>,
    /// Primary-key value -> row position (last occurrence wins).
    pub(crate) key_index: HashMap<Key, usize>,
}

impl Table {
    /// Validates a description and builds the table and its indices.
    ///
    /// Fails on a wrong `kind` tag, unsynthesizable columns, row arity
    /// mismatches, an unresolved primary key, or two rows carrying the
    /// same key with different content (identical duplicates are
    /// tolerated; the index keeps the last occurrence).
    pub fn build(spec: TableSpec) -> Result<Table> {
        if let Some(kind) = &spec.kind {
            if kind != "table" {
                return Err(Error::InvalidDescription(format!(
                    "object kind {:?} is not \"table\"",
                    kind
                )));
            }
        }

        let rows = spec.rows;
        let columns = match spec.columns {
            Some(columns) => columns,
            None => {
                let width = rows.first().map(|r| r.len()).unwrap_or(0);
                if width == 0 {
                    return Err(Error::InvalidDescription(
                        "cannot synthesize column names without a non-empty first row".into(),
                    ));
                }
                (0..width).map(|i| format!("c{}", i)).collect()
            }
        };

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::ArityMismatch {
                    row: i,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }

        let mut lookup = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            lookup.insert(column.to_lowercase(), i);
        }

        let mut key_index = HashMap::new();
        if let Some(pk) = &spec.primary_key {
            let idx = *lookup
                .get(&pk.to_lowercase())
                .ok_or_else(|| Error::UnresolvedPrimaryKey(pk.clone()))?;
            for (i, row) in rows.iter().enumerate() {
                let key = row[idx].key();
                if let Some(&prev) = key_index.get(&key) {
                    if rows[prev] != *row {
                        return Err(Error::DuplicateKeyConflict(row[idx].to_string()));
                    }
                }
                key_index.insert(key, i);
            }
        }

        Ok(Table {
            name: spec.name,
            comment: spec.comment,
            version: spec.version.unwrap_or(CURRENT_TABLE_VERSION),
            columns,
            lookup,
            rows,
            primary_key: spec.primary_key,
            key_index,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Case-preserved column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The raw row matrix.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Whether a row carries `key` as its primary-key value.
    pub fn has_key(&self, key: &Value) -> bool {
        self.primary_key.is_some() && self.key_index.contains_key(&key.key())
    }

    /// Case-insensitive column resolution.
    pub(crate) fn column_index(&self, name: &str) -> Result<usize> {
        self.lookup
            .get(&name.to_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// The row addressed by `id`: an integer that is not a known key is a
    /// zero-based position, anything else is a primary-key lookup.
    pub fn row(&self, id: &Value) -> Result<Row<'_>> {
        if let Value::Int(i) = id {
            if !self.has_key(id) {
                // negative positions are simply out of bounds
                let idx = usize::try_from(*i).unwrap_or(usize::MAX);
                return self.row_by_index(idx);
            }
        }
        self.row_by_key(id)
    }

    /// The `index`th row of the table.
    pub fn row_by_index(&self, index: usize) -> Result<Row<'_>> {
        self.rows
            .get(index)
            .map(|r| Row::borrowed(&self.columns, r))
            .ok_or(Error::IndexOutOfBounds(index))
    }

    /// The row carrying `key` as its primary-key value.
    pub fn row_by_key(&self, key: &Value) -> Result<Row<'_>> {
        self.key_index
            .get(&key.key())
            .map(|&i| Row::borrowed(&self.columns, &self.rows[i]))
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// The row addressed by `id`, as an owned value list.
    pub fn row_as_list(&self, id: &Value) -> Result<Vec<Value>> {
        Ok(self.row(id)?.values().to_vec())
    }

    /// Iterates the table as [`Row`] views.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|r| Row::borrowed(&self.columns, r))
    }

    /// A single-row table as its [`Row`].
    pub fn to_row(&self) -> Result<Row<'_>> {
        if self.rows.len() == 1 {
            self.row_by_index(0)
        } else {
            Err(Error::NotSingular {
                rows: self.rows.len(),
                columns: self.columns.len(),
            })
        }
    }

    /// A 1x1 table as its single value.
    pub fn to_scalar(&self) -> Result<&Value> {
        if self.rows.len() == 1 && self.columns.len() == 1 {
            Ok(&self.rows[0][0])
        } else {
            Err(Error::NotSingular {
                rows: self.rows.len(),
                columns: self.columns.len(),
            })
        }
    }

    /// The same table under a different name. Data is shared semantics:
    /// only the metadata changes.
    pub fn with_name(mut self, name: Option<String>) -> Table {
        self.name = name;
        self
    }

    /// The same table with a different comment.
    pub fn with_comment(mut self, comment: Option<String>) -> Table {
        self.comment = comment;
        self
    }

    /// The inverse of [`Table::build`]: the canonical description of this
    /// table. With `include_data` false the rows are left out, which is
    /// the schema-only preview used by `describe`-style output.
    pub fn describe(&self, include_data: bool) -> TableSpec {
        TableSpec {
            kind: Some("table".to_string()),
            version: Some(self.version),
            name: self.name.clone(),
            comment: self.comment.clone(),
            columns: Some(self.columns.clone()),
            primary_key: self.primary_key.clone(),
            rows: if include_data {
                self.rows.clone()
            } else {
                Vec::new()
            },
        }
    }
}

/// Tables are equal when their column lists match (order-sensitive) and
/// they hold the same rows regardless of row order: every row of one is
/// contained in the other and the row counts agree.
impl PartialEq for Table {
    fn eq(&self, other: &Table) -> bool {
        self.columns == other.columns
            && self.rows.len() == other.rows.len()
            && self.rows.iter().all(|r| other.rows.contains(r))
    }
}
