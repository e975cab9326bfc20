//! Core types and the schema catalog for the obscat observation archive.
//!
//! This crate is deliberately free of file-format and database dependencies.
//! All other crates depend on it; it depends on nothing heavier than serde.

pub mod catalog;
pub mod detector;
pub mod drizzle;
pub mod error;
pub mod exts;
pub mod filekind;
pub mod proposal;
pub mod rootname;
pub mod value;

pub use catalog::{SchemaCatalog, TableDef};
pub use detector::Detector;
pub use drizzle::{drizzle_field_type, DRIZZLE_FIELDS};
pub use error::{Error, Result};
pub use exts::{extensions_for, extname_ingestable};
pub use filekind::FileKind;
pub use proposal::ProposalType;
pub use rootname::{Rootname, TableId};
pub use value::{ColumnType, HeaderValue};
