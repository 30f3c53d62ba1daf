//! Shared table fixtures for the integration suites.

#![allow(dead_code)]

use jrel_core::prelude::*;

/// Builds a table of integer rows.
pub fn ints(columns: &[&str], pk: Option<&str>, rows: &[&[i64]]) -> Table {
    Table::build(TableSpec {
        columns: Some(columns.iter().map(|c| c.to_string()).collect()),
        primary_key: pk.map(str::to_string),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|&i| Value::Int(i)).collect())
            .collect(),
        ..Default::default()
    })
    .unwrap()
}

/// `{a, b}` keyed on `a`, rows `[1,2],[3,4]`.
pub fn table_one() -> Table {
    ints(&["a", "b"], Some("a"), &[&[1, 2], &[3, 4]])
}

/// Columns synthesized from the rows.
pub fn table_two() -> Table {
    Table::build(TableSpec {
        rows: vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4)],
        ],
        ..Default::default()
    })
    .unwrap()
}

/// The `emp` table keyed on `empno`.
pub fn table_emp() -> Table {
    ints(&["empno", "dept"], Some("empno"), &[&[1, 1], &[2, 2], &[3, 3]])
        .with_name(Some("emp".to_string()))
}

pub fn table_three() -> Table {
    ints(&["a", "b"], None, &[&[1, 2], &[2, 3], &[3, 4]])
}

pub fn table_four() -> Table {
    ints(&["a", "b"], None, &[&[1, 2], &[2, 3], &[5, 6]])
}

pub fn table_five() -> Table {
    ints(&["a", "b"], None, &[&[1, 2], &[2, 3], &[3, 4], &[5, 6]])
}

pub fn table_six() -> Table {
    ints(&["a", "b"], None, &[&[5, 6]])
}
