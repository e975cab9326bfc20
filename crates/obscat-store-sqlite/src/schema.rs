//! DDL generation for the obscat SQLite schema.
//!
//! The header tables are driven by the schema catalog, so the DDL is built
//! at connection startup instead of being spelled out as a constant. The
//! fixed tables (`master`, `datasets`, `drizzle_data`) are the same for
//! every catalog.

use std::fmt::Write as _;

use obscat_core::{ColumnType, FileKind, SchemaCatalog, DRIZZLE_FIELDS};
use strum::IntoEnumIterator as _;

const PRAGMAS: &str = "\
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 30000;
";

const MASTER: &str = "
-- One row per observation; rootname is the natural key everywhere.
CREATE TABLE IF NOT EXISTS master (
    rootname          TEXT PRIMARY KEY,
    path              TEXT NOT NULL UNIQUE,
    first_ingest_date TEXT NOT NULL,
    last_ingest_date  TEXT NOT NULL,
    detector          TEXT NOT NULL,
    proposid          INTEGER,
    proposal_type     TEXT
);
";

/// SQLite column affinity for a declared catalog type.
fn affinity(ty: ColumnType) -> &'static str {
  match ty {
    ColumnType::Integer | ColumnType::Bool => "INTEGER",
    ColumnType::Float | ColumnType::Decimal => "REAL",
    ColumnType::String
    | ColumnType::Date
    | ColumnType::Time
    | ColumnType::DateTime => "TEXT",
  }
}

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub fn ddl(catalog: &SchemaCatalog) -> String {
  let mut sql = String::new();
  sql.push_str(PRAGMAS);
  sql.push_str(MASTER);

  // One filename column per filetype category.
  sql.push_str(
    "\nCREATE TABLE IF NOT EXISTS datasets (\n    \
     rootname TEXT PRIMARY KEY REFERENCES master(rootname)",
  );
  for kind in FileKind::iter() {
    let _ = write!(sql, ",\n    {kind} TEXT");
  }
  sql.push_str("\n);\n");

  // Indexed drizzle parameter groups of combined products.
  sql.push_str(
    "\nCREATE TABLE IF NOT EXISTS drizzle_data (\n    \
     rootname      TEXT NOT NULL REFERENCES master(rootname),\n    \
     drizzle_index INTEGER NOT NULL",
  );
  for (field, ty) in DRIZZLE_FIELDS {
    let _ = write!(sql, ",\n    {field} {}", affinity(*ty));
  }
  sql.push_str(",\n    PRIMARY KEY (rootname, drizzle_index)\n);\n");

  // One header table per (detector, filetype, extension).
  for def in catalog.tables() {
    let _ = write!(
      sql,
      "\nCREATE TABLE IF NOT EXISTS {} (\n    \
       rootname TEXT PRIMARY KEY REFERENCES master(rootname),\n    \
       filename TEXT NOT NULL UNIQUE",
      def.name()
    );
    for (column, ty) in def.columns() {
      let _ = write!(sql, ",\n    {column} {}", affinity(ty));
    }
    sql.push_str("\n);\n");
  }

  sql
}
