//! Convenient re-exports for downstream crates.

pub use crate::database::{Database, DatabaseSpec, CURRENT_DATABASE_VERSION};
pub use crate::error::{Error, Result};
pub use crate::row::{Group, Row};
pub use crate::table::{Table, TableSpec, CURRENT_TABLE_VERSION};
pub use crate::value::Value;
