//! In-memory relational algebra over JSON-shaped tables.
//!
//! The core entity is the immutable [`table::Table`]: an ordered column
//! schema, a row matrix, and an optional unique primary key. Every
//! operator (`project`, `restrict`, `join`, the set algebra, `summarize`,
//! `order_by`, ...) is a pure function producing a brand-new table through
//! the single validated construction path, so tables can be shared freely
//! across readers.
//!
//! Serialization (JSON/CSV) lives in `jrel-io`; this crate only defines
//! the structural descriptions ([`table::TableSpec`],
//! [`database::DatabaseSpec`]) those codecs read and write.

pub mod database;
pub mod error;
pub mod prelude;
pub mod row;
pub mod table;
pub mod value;

mod join;
mod select;
mod sets;
mod sort;
mod summarize;
