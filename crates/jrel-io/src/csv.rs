//! CSV codec (RFC 4180) for tables.
//!
//! CSV carries no type information: every cell is read as a string value,
//! and writing substitutes a configurable placeholder for nulls.

use std::io::{Read, Write};

use jrel_core::prelude::*;

use crate::error::Result;

/// Reads a table from CSV records.
///
/// With `has_headers` the first record names the columns; otherwise the
/// supplied `headings` are used, and with neither the core synthesizes
/// `c0..cN-1`. Every cell becomes a [`Value::Str`]; no type inference is
/// attempted.
pub fn table_from_csv<R: Read>(
    reader: R,
    has_headers: bool,
    headings: Option<Vec<String>>,
) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut columns = headings;
    let mut rows: Vec<Vec<Value>> = Vec::new();
    let mut header_pending = has_headers;
    for record in rdr.records() {
        let record = record?;
        if header_pending {
            columns = Some(record.iter().map(str::to_string).collect());
            header_pending = false;
            continue;
        }
        rows.push(record.iter().map(|s| Value::Str(s.to_string())).collect());
    }
    tracing::debug!(rows = rows.len(), "read table from CSV");

    Ok(Table::build(TableSpec {
        columns,
        rows,
        ..Default::default()
    })?)
}

/// Writes a table as RFC 4180 CSV (CRLF records): a header row of column
/// names, then one record per row with `null_as` substituted for null
/// cells.
pub fn table_to_csv<W: Write>(writer: W, table: &Table, null_as: &str) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    w.write_record(table.columns())?;
    for row in table.rows() {
        let record: Vec<String> = row
            .iter()
            .map(|v| {
                if v.is_null() {
                    null_as.to_string()
                } else {
                    v.to_string()
                }
            })
            .collect();
        w.write_record(&record)?;
    }
    w.flush()?;
    tracing::debug!(rows = table.len(), "wrote table as CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<Value> {
        cells.iter().map(|s| Value::Str(s.to_string())).collect()
    }

    #[test]
    fn reads_heading_row() {
        let t = table_from_csv("a,b\r\n1,2\r\n".as_bytes(), true, None).unwrap();
        assert_eq!(t.columns(), ["a", "b"]);
        assert_eq!(t.rows(), [strings(&["1", "2"])]);
    }

    #[test]
    fn reads_with_supplied_headings() {
        let t = table_from_csv(
            "1,2\r\n3,4\r\n".as_bytes(),
            false,
            Some(vec!["a".into(), "b".into()]),
        )
        .unwrap();
        assert_eq!(t.columns(), ["a", "b"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn synthesizes_columns_without_headings() {
        let t = table_from_csv("1,2\r\n3,4\r\n".as_bytes(), false, None).unwrap();
        assert_eq!(t.columns(), ["c0", "c1"]);
        assert_eq!(t.rows()[1], strings(&["3", "4"]));
    }

    #[test]
    fn writes_crlf_records_with_null_placeholder() {
        let t = Table::build(TableSpec {
            columns: Some(vec!["a".into(), "b".into()]),
            rows: vec![vec![Value::Str("1".into()), Value::Null]],
            ..Default::default()
        })
        .unwrap();
        let mut out = Vec::new();
        table_to_csv(&mut out, &t, "null").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\r\n1,null\r\n");
    }

    #[test]
    fn default_null_placeholder_is_empty() {
        let t = Table::build(TableSpec {
            columns: Some(vec!["a".into()]),
            rows: vec![vec![Value::Null]],
            ..Default::default()
        })
        .unwrap();
        let mut out = Vec::new();
        table_to_csv(&mut out, &t, "").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\r\n\"\"\r\n");
    }

    #[test]
    fn csv_round_trip_preserves_cells_as_strings() {
        let t = table_from_csv("a,b\r\nx,2\r\ny,4\r\n".as_bytes(), true, None).unwrap();
        let mut out = Vec::new();
        table_to_csv(&mut out, &t, "").unwrap();
        let back = table_from_csv(out.as_slice(), true, None).unwrap();
        assert_eq!(back, t);
    }
}
