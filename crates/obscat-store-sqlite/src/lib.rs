//! SQLite backend for the obscat observation archive.
//!
//! The header tables are generated from the schema catalog at connection
//! startup, so the DDL always matches the embedded table definitions. All
//! writes are single-statement upserts; re-ingesting a rootname merges into
//! existing rows instead of replacing them.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{HeaderRow, NewObservation, ObservationRow, SqliteStore};

#[cfg(test)]
mod tests;
