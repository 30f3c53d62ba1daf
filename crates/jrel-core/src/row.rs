//! Row and group views handed to operator callbacks.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::value::Value;

/// An ordered, case-insensitively addressable view of one table row.
///
/// Rows are read-through projections: a row borrowed from a table never
/// mutates it. Callbacks that produce rows (`extend`, `update`, summarize
/// aggregators) build owned rows with [`Row::new`] or [`Row::from_pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    columns: Cow<'a, [String]>,
    values: Cow<'a, [Value]>,
}

impl<'a> Row<'a> {
    pub(crate) fn borrowed(columns: &'a [String], values: &'a [Value]) -> Row<'a> {
        Row {
            columns: Cow::Borrowed(columns),
            values: Cow::Borrowed(values),
        }
    }

    /// Builds an owned row from parallel column and value lists.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Row<'static> {
        Row {
            columns: Cow::Owned(columns),
            values: Cow::Owned(values),
        }
    }

    /// Builds an owned row from (column, value) pairs.
    pub fn from_pairs(pairs: Vec<(String, Value)>) -> Row<'static> {
        let (columns, values) = pairs.into_iter().unzip();
        Row::new(columns, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Case-preserved column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values.into_owned()
    }

    /// Case-insensitive position of `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let lower = name.to_lowercase();
        self.columns.iter().position(|c| c.to_lowercase() == lower)
    }

    /// Value of the named column (case-insensitive lookup).
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.index_of(name)
            .map(|i| &self.values[i])
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Positional lookup.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .zip(self.values.iter())
    }
}

/// One cell of an accumulated group: the single key value for a grouping
/// column, or every value seen across the group for the rest.
#[derive(Debug, Clone)]
pub(crate) enum GroupCell {
    One(Value),
    Many(Vec<Value>),
}

/// Per-group view handed to a summarize aggregator.
///
/// The grouping columns resolve to single values; every other column
/// resolves to the list of values accumulated across the group, in row
/// order.
#[derive(Debug)]
pub struct Group<'a> {
    columns: &'a [String],
    cells: &'a [GroupCell],
    rows: usize,
}

impl<'a> Group<'a> {
    pub(crate) fn new(columns: &'a [String], cells: &'a [GroupCell], rows: usize) -> Group<'a> {
        Group {
            columns,
            cells,
            rows,
        }
    }

    /// Number of rows folded into this group.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names of the source table.
    pub fn columns(&self) -> &[String] {
        self.columns
    }

    /// The group-key value of a grouping column. `None` for aggregated
    /// columns and unknown names.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.cell(name)? {
            GroupCell::One(v) => Some(v),
            GroupCell::Many(_) => None,
        }
    }

    /// Every value of the named column across the group. Grouping columns
    /// yield a single-element slice.
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        match self.cell(name)? {
            GroupCell::One(v) => Some(std::slice::from_ref(v)),
            GroupCell::Many(vs) => Some(vs),
        }
    }

    fn cell(&self, name: &str) -> Option<&'a GroupCell> {
        let lower = name.to_lowercase();
        let idx = self.columns.iter().position(|c| c.to_lowercase() == lower)?;
        self.cells.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row<'static> {
        Row::new(
            vec!["Id".into(), "Name".into()],
            vec![Value::Int(1), Value::Str("ada".into())],
        )
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let row = sample();
        assert_eq!(row.get("id").unwrap(), &Value::Int(1));
        assert_eq!(row.get("NAME").unwrap(), &Value::Str("ada".into()));
        assert!(matches!(row.get("age"), Err(Error::UnknownColumn(_))));
    }

    #[test]
    fn positional_lookup() {
        let row = sample();
        assert_eq!(row.at(0), Some(&Value::Int(1)));
        assert_eq!(row.at(2), None);
    }

    #[test]
    fn from_pairs_preserves_order() {
        let row = Row::from_pairs(vec![
            ("b".to_string(), Value::Int(2)),
            ("a".to_string(), Value::Int(1)),
        ]);
        assert_eq!(row.columns(), ["b", "a"]);
        assert_eq!(row.into_values(), vec![Value::Int(2), Value::Int(1)]);
    }

    #[test]
    fn group_cells_resolve_by_kind() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let cells = vec![
            GroupCell::One(Value::Int(1)),
            GroupCell::Many(vec![Value::Int(2), Value::Int(4)]),
        ];
        let group = Group::new(&columns, &cells, 2);
        assert_eq!(group.value("a"), Some(&Value::Int(1)));
        assert_eq!(group.value("b"), None);
        assert_eq!(group.values("b").unwrap().len(), 2);
        assert_eq!(group.values("A").unwrap(), &[Value::Int(1)][..]);
    }
}
