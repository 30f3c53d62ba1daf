//! A name-keyed collection of tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::{Table, TableSpec};

/// Version tag written into freshly built database descriptions.
pub const CURRENT_DATABASE_VERSION: u32 = 1;

/// Structural description of a database: the same metadata envelope as a
/// table, nesting a map of table descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub tables: BTreeMap<String, TableSpec>,
}

/// An ordered-by-name mapping of table name to [`Table`], with the same
/// name/comment/version metadata as a table.
///
/// The container itself is mutable (tables can be inserted and removed);
/// all table semantics are delegated to the core.
#[derive(Debug, Clone)]
pub struct Database {
    name: Option<String>,
    comment: Option<String>,
    version: u32,
    tables: BTreeMap<String, Table>,
}

impl Default for Database {
    fn default() -> Self {
        Database {
            name: None,
            comment: None,
            version: CURRENT_DATABASE_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

impl Database {
    pub fn new() -> Database {
        Database::default()
    }

    /// Validates a description and builds the database, building every
    /// contained table through [`Table::build`].
    pub fn build(spec: DatabaseSpec) -> Result<Database> {
        if let Some(kind) = &spec.kind {
            if kind != "database" {
                return Err(Error::InvalidDescription(format!(
                    "object kind {:?} is not \"database\"",
                    kind
                )));
            }
        }
        let mut tables = BTreeMap::new();
        for (name, table_spec) in spec.tables {
            tables.insert(name, Table::build(table_spec)?);
        }
        Ok(Database {
            name: spec.name,
            comment: spec.comment,
            version: spec.version.unwrap_or(CURRENT_DATABASE_VERSION),
            tables,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(name)
    }

    /// Table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The canonical description of this database; tables are emitted in
    /// name order. With `include_data` false every table is schema-only.
    pub fn describe(&self, include_data: bool) -> DatabaseSpec {
        DatabaseSpec {
            kind: Some("database".to_string()),
            version: Some(self.version),
            name: self.name.clone(),
            comment: self.comment.clone(),
            tables: self
                .tables
                .iter()
                .map(|(name, table)| (name.clone(), table.describe(include_data)))
                .collect(),
        }
    }
}

/// Databases are equal when they contain the same table names mapping to
/// equal tables.
impl PartialEq for Database {
    fn eq(&self, other: &Database) -> bool {
        self.tables.len() == other.tables.len()
            && self
                .tables
                .iter()
                .all(|(name, table)| other.tables.get(name) == Some(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn table_one() -> Table {
        Table::build(TableSpec {
            columns: Some(vec!["a".into(), "b".into()]),
            primary_key: Some("a".into()),
            rows: vec![
                vec![Value::Int(1), Value::Int(2)],
                vec![Value::Int(3), Value::Int(4)],
            ],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn empty_databases_are_equal() {
        assert_eq!(Database::new(), Database::build(DatabaseSpec::default()).unwrap());
        assert_eq!(Database::new().version(), CURRENT_DATABASE_VERSION);
    }

    #[test]
    fn rejects_wrong_kind() {
        let err = Database::build(DatabaseSpec {
            kind: Some("table".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidDescription(_)));
    }

    #[test]
    fn lookup_and_mutation() {
        let mut db = Database::new();
        db.insert("a", table_one());
        assert_eq!(db.get("a"), Some(&table_one()));
        assert_eq!(db.len(), 1);
        assert!(db.get("missing").is_none());
        assert_eq!(db.remove("a"), Some(table_one()));
        assert!(db.is_empty());
    }

    #[test]
    fn names_iterate_in_sorted_order() {
        let mut db = Database::new();
        db.insert("zeta", table_one());
        db.insert("alpha", table_one());
        assert_eq!(db.names().collect::<Vec<_>>(), ["alpha", "zeta"]);
    }

    #[test]
    fn equality_by_contents() {
        let mut a = Database::new();
        a.insert("t", table_one());
        let mut b = Database::new();
        b.insert("t", table_one());
        assert_eq!(a, b);
        b.insert("u", table_one());
        assert_ne!(a, b);
    }

    #[test]
    fn describe_round_trips() {
        let mut db = Database::new();
        db.set_name(Some("db".into()));
        db.set_comment(Some("test db".into()));
        db.insert("a", table_one());
        let spec = db.describe(true);
        assert_eq!(spec.kind.as_deref(), Some("database"));
        let back = Database::build(spec).unwrap();
        assert_eq!(back, db);
        assert_eq!(back.name(), Some("db"));
        assert_eq!(back.comment(), Some("test db"));
    }
}
