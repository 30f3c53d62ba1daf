use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by table construction and the relational operators.
///
/// These are caller-input errors, surfaced synchronously and never retried.
/// All validation happens at construction or at the start of an operator;
/// no operation leaves a partially-built table behind.
#[derive(Debug, Error)]
pub enum Error {
    /// The structural description is not shaped like a table or database.
    #[error("invalid description: {0}")]
    InvalidDescription(String),

    /// A row's length disagrees with the column count.
    #[error("row {row} has {actual} values, expected {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The declared primary key does not name a column.
    #[error("primary key {0:?} is not a column")]
    UnresolvedPrimaryKey(String),

    /// An operator addressed a column that does not exist.
    #[error("unknown column {0:?}")]
    UnknownColumn(String),

    /// A set operator received tables with different column lists.
    #[error("tables do not share the same column list")]
    SchemaMismatch,

    /// Join-column resolution found no common column. A join without a
    /// join column would be a cartesian product, which is rejected.
    #[error("no common column to join on (cartesian joins are not supported)")]
    NoJoinColumn,

    /// Join-column resolution found more than one common column.
    #[error("ambiguous join: common columns are {0:?}")]
    AmbiguousJoinColumn(Vec<String>),

    /// Two rows carry the same primary key with different content.
    #[error("duplicate primary key \"{0}\"")]
    DuplicateKeyConflict(String),

    /// No row carries the requested primary key.
    #[error("no row with primary key \"{0}\"")]
    KeyNotFound(String),

    /// A positional row access past the end of the table.
    #[error("row index {0} is out of bounds")]
    IndexOutOfBounds(usize),

    /// A scalar/row extraction was applied to a table of the wrong shape.
    #[error("table has {rows} rows and {columns} columns, expected exactly one")]
    NotSingular { rows: usize, columns: usize },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidDescription(e.to_string())
    }
}
