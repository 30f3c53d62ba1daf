//! JSON codec for tables and databases.
//!
//! The canonical document shapes are [`TableSpec`] and [`DatabaseSpec`];
//! this module only moves them between text and validated values, so a
//! parse-build-emit-parse cycle is a fixed point.

use std::io::Read;

use jrel_core::prelude::*;

use crate::error::Result;

/// Parses and validates a table from its JSON text.
pub fn table_from_json(text: &str) -> Result<Table> {
    let spec: TableSpec = serde_json::from_str(text)?;
    let table = Table::build(spec)?;
    tracing::debug!(rows = table.len(), "parsed table from JSON");
    Ok(table)
}

/// Parses and validates a table from a reader.
pub fn table_from_reader<R: Read>(reader: R) -> Result<Table> {
    let spec: TableSpec = serde_json::from_reader(reader)?;
    Ok(Table::build(spec)?)
}

/// Emits a table as JSON, compact or pretty. With `include_data` false
/// only the schema is emitted (`"rows": []`).
pub fn table_to_json(table: &Table, pretty: bool, include_data: bool) -> Result<String> {
    let spec = table.describe(include_data);
    let text = if pretty {
        serde_json::to_string_pretty(&spec)?
    } else {
        serde_json::to_string(&spec)?
    };
    tracing::debug!(rows = table.len(), pretty, "emitted table as JSON");
    Ok(text)
}

/// Parses and validates a database from its JSON text.
pub fn database_from_json(text: &str) -> Result<Database> {
    let spec: DatabaseSpec = serde_json::from_str(text)?;
    let db = Database::build(spec)?;
    tracing::debug!(tables = db.len(), "parsed database from JSON");
    Ok(db)
}

/// Parses and validates a database from a reader.
pub fn database_from_reader<R: Read>(reader: R) -> Result<Database> {
    let spec: DatabaseSpec = serde_json::from_reader(reader)?;
    Ok(Database::build(spec)?)
}

/// Emits a database as JSON; tables appear in name order.
pub fn database_to_json(db: &Database, pretty: bool, include_data: bool) -> Result<String> {
    let spec = db.describe(include_data);
    let text = if pretty {
        serde_json::to_string_pretty(&spec)?
    } else {
        serde_json::to_string(&spec)?
    };
    Ok(text)
}
