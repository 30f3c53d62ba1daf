//! Grouping with per-group aggregation.

use indexmap::IndexMap;

use crate::error::Result;
use crate::row::{Group, GroupCell, Row};
use crate::table::{Table, TableSpec};
use crate::value::{Key, Value};

impl Table {
    /// Groups rows by the named columns and counts each group.
    ///
    /// The output holds the group-key columns followed by a `count`
    /// column; groups appear in first-occurrence order. An empty
    /// `group_columns` folds the whole table into a single row.
    pub fn summarize(&self, group_columns: &[&str]) -> Result<Table> {
        let (names, indices) = self.resolve_group_columns(group_columns)?;

        let mut groups: IndexMap<Vec<Key>, (Vec<Value>, i64)> = IndexMap::new();
        for row in &self.rows {
            let key: Vec<Key> = indices.iter().map(|&i| row[i].key()).collect();
            groups
                .entry(key)
                .or_insert_with(|| (indices.iter().map(|&i| row[i].clone()).collect(), 0))
                .1 += 1;
        }

        let mut columns = names;
        columns.push("count".to_string());
        let rows = groups
            .into_values()
            .map(|(mut key_values, count)| {
                key_values.push(Value::Int(count));
                key_values
            })
            .collect();
        Table::build(TableSpec {
            columns: Some(columns),
            rows,
            ..Default::default()
        })
    }

    /// Groups rows by the named columns and aggregates each group through
    /// `aggregator`.
    ///
    /// The aggregator sees a [`Group`]: the grouping columns as single
    /// values, every other column as the list of values accumulated across
    /// the group. It returns a row holding only the columns to append to
    /// the group key. The first group's returned column set defines the
    /// output schema; the aggregator must be schema-stable across groups.
    pub fn summarize_with<F>(&self, group_columns: &[&str], aggregator: F) -> Result<Table>
    where
        F: Fn(&Group<'_>) -> Row<'static>,
    {
        let (names, indices) = self.resolve_group_columns(group_columns)?;
        let grouped: Vec<bool> = (0..self.columns.len())
            .map(|i| indices.contains(&i))
            .collect();

        struct Acc {
            key_values: Vec<Value>,
            cells: Vec<GroupCell>,
            rows: usize,
        }

        let mut groups: IndexMap<Vec<Key>, Acc> = IndexMap::new();
        for row in &self.rows {
            let key: Vec<Key> = indices.iter().map(|&i| row[i].key()).collect();
            let acc = groups.entry(key).or_insert_with(|| Acc {
                key_values: indices.iter().map(|&i| row[i].clone()).collect(),
                cells: row
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        if grouped[i] {
                            GroupCell::One(v.clone())
                        } else {
                            GroupCell::Many(Vec::new())
                        }
                    })
                    .collect(),
                rows: 0,
            });
            acc.rows += 1;
            for (i, v) in row.iter().enumerate() {
                if let GroupCell::Many(vs) = &mut acc.cells[i] {
                    vs.push(v.clone());
                }
            }
        }

        let mut added: Option<Vec<String>> = None;
        let mut rows = Vec::with_capacity(groups.len());
        for acc in groups.into_values() {
            let group = Group::new(&self.columns, &acc.cells, acc.rows);
            let extra = aggregator(&group);
            if added.is_none() {
                added = Some(extra.columns().to_vec());
            }
            let mut out = acc.key_values;
            out.extend(extra.into_values());
            rows.push(out);
        }

        let mut columns = names;
        columns.extend(added.unwrap_or_default());
        Table::build(TableSpec {
            columns: Some(columns),
            rows,
            ..Default::default()
        })
    }

    fn resolve_group_columns(&self, group_columns: &[&str]) -> Result<(Vec<String>, Vec<usize>)> {
        let names: Vec<String> = group_columns.iter().map(|c| c.trim().to_string()).collect();
        let mut indices = Vec::with_capacity(names.len());
        for name in &names {
            indices.push(self.column_index(name)?);
        }
        Ok((names, indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::build(TableSpec {
            columns: Some(vec!["a".into(), "b".into(), "c".into()]),
            rows: vec![
                vec![Value::Int(1), Value::Int(2), Value::Int(10)],
                vec![Value::Int(1), Value::Int(4), Value::Int(5)],
                vec![Value::Int(2), Value::Int(2), Value::Int(8)],
                vec![Value::Int(2), Value::Int(4), Value::Int(6)],
                vec![Value::Int(2), Value::Int(5), Value::Int(5)],
                vec![Value::Int(2), Value::Int(5), Value::Int(6)],
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn default_aggregate_counts_groups() {
        let t = sample().summarize(&["a"]).unwrap();
        assert_eq!(t.columns(), ["a", "count"]);
        assert_eq!(
            t.rows(),
            [
                vec![Value::Int(1), Value::Int(2)],
                vec![Value::Int(2), Value::Int(4)],
            ]
        );
    }

    #[test]
    fn group_key_follows_requested_order() {
        let t = sample().summarize(&["b", "a"]).unwrap();
        assert_eq!(t.columns(), ["b", "a", "count"]);
        assert_eq!(
            t.rows(),
            [
                vec![Value::Int(2), Value::Int(1), Value::Int(1)],
                vec![Value::Int(4), Value::Int(1), Value::Int(1)],
                vec![Value::Int(2), Value::Int(2), Value::Int(1)],
                vec![Value::Int(4), Value::Int(2), Value::Int(1)],
                vec![Value::Int(5), Value::Int(2), Value::Int(2)],
            ]
        );
    }

    #[test]
    fn empty_group_list_is_a_global_summary() {
        let t = sample().summarize(&[]).unwrap();
        assert_eq!(t.columns(), ["count"]);
        assert_eq!(t.rows(), [vec![Value::Int(6)]]);
    }

    #[test]
    fn aggregator_sees_value_lists() {
        let t = sample()
            .summarize_with(&["a"], |group| {
                let bs = group.values("b").unwrap();
                let max = bs.iter().filter_map(Value::as_int).max().unwrap_or(0);
                let min = bs.iter().filter_map(Value::as_int).min().unwrap_or(0);
                Row::from_pairs(vec![
                    ("max_b".to_string(), Value::Int(max)),
                    ("min_b".to_string(), Value::Int(min)),
                ])
            })
            .unwrap();
        assert_eq!(t.columns(), ["a", "max_b", "min_b"]);
        assert_eq!(
            t.rows(),
            [
                vec![Value::Int(1), Value::Int(4), Value::Int(2)],
                vec![Value::Int(2), Value::Int(5), Value::Int(2)],
            ]
        );
    }

    #[test]
    fn aggregator_sees_group_size_and_keys() {
        let t = sample()
            .summarize_with(&["a"], |group| {
                assert!(group.value("a").is_some());
                assert_eq!(group.value("b"), None);
                Row::from_pairs(vec![(
                    "n".to_string(),
                    Value::Int(group.len() as i64),
                )])
            })
            .unwrap();
        assert_eq!(
            t.rows(),
            [
                vec![Value::Int(1), Value::Int(2)],
                vec![Value::Int(2), Value::Int(4)],
            ]
        );
    }
}
