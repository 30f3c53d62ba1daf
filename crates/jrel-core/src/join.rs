//! Single-column equality joins, inner and outer.

use crate::error::{Error, Result};
use crate::table::{Table, TableSpec};
use crate::value::Value;

/// Concatenates a left row with a right row, eliding the right side's join
/// column.
fn merge_rows<T: Clone>(left: &[T], right: &[T], skip: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len().saturating_sub(1));
    out.extend_from_slice(left);
    for (i, cell) in right.iter().enumerate() {
        if i != skip {
            out.push(cell.clone());
        }
    }
    out
}

impl Table {
    /// Joins two tables on a single column of equal values.
    ///
    /// When `self_col` is given, `other_col` defaults to the same name.
    /// With neither given, the single case-insensitive common column is
    /// used; zero common columns would be a cartesian product and is
    /// rejected, more than one is ambiguous.
    ///
    /// If the join column is `other`'s primary key the match is a key
    /// lookup per left row; otherwise a nested-loop scan emits one output
    /// row per matching pair. With `outer` set, a left row with no match
    /// is padded with nulls for every `other` column except the join
    /// column. The result keeps `self`'s columns followed by `other`'s
    /// minus the join column, and carries no primary key (fan-out can
    /// break uniqueness).
    pub fn join(
        &self,
        other: &Table,
        outer: bool,
        self_col: Option<&str>,
        other_col: Option<&str>,
    ) -> Result<Table> {
        let (self_name, other_name) = match (self_col, other_col) {
            (Some(s), o) => (s.to_string(), o.unwrap_or(s).to_string()),
            (None, _) => {
                let mut common: Vec<String> = self
                    .lookup
                    .keys()
                    .filter(|name| other.lookup.contains_key(*name))
                    .cloned()
                    .collect();
                common.sort();
                match common.len() {
                    1 => {
                        let name = common.pop().unwrap_or_default();
                        (name.clone(), name)
                    }
                    0 => return Err(Error::NoJoinColumn),
                    _ => return Err(Error::AmbiguousJoinColumn(common)),
                }
            }
        };

        let self_idx = self.column_index(&self_name)?;
        let other_idx = other.column_index(&other_name)?;
        let key_join = other
            .primary_key()
            .is_some_and(|pk| pk.to_lowercase() == other_name.to_lowercase());

        let columns = merge_rows(&self.columns, &other.columns, other_idx);
        let null_row = vec![Value::Null; other.columns.len()];

        let mut rows = Vec::new();
        for srow in &self.rows {
            if key_join {
                match other.key_index.get(&srow[self_idx].key()) {
                    Some(&at) => rows.push(merge_rows(srow, &other.rows[at], other_idx)),
                    None if outer => rows.push(merge_rows(srow, &null_row, other_idx)),
                    None => {}
                }
            } else {
                let mut found = false;
                for orow in &other.rows {
                    if srow[self_idx] == orow[other_idx] {
                        rows.push(merge_rows(srow, orow, other_idx));
                        found = true;
                    }
                }
                if outer && !found {
                    rows.push(merge_rows(srow, &null_row, other_idx));
                }
            }
        }

        Table::build(TableSpec {
            columns: Some(columns),
            rows,
            ..Default::default()
        })
    }

    /// Inner join on the natural (single common) column.
    pub fn inner_join(&self, other: &Table) -> Result<Table> {
        self.join(other, false, None, None)
    }

    /// Left outer join on the natural (single common) column.
    pub fn outer_join(&self, other: &Table) -> Result<Table> {
        self.join(other, true, None, None)
    }
}
