//! [`SqliteStore`] — one connection to the observation archive database.

use std::{collections::HashSet, path::Path, sync::Arc};

use chrono::Utc;
use rusqlite::{types::Value, OptionalExtension as _};

use obscat_core::{
  drizzle_field_type, Detector, FileKind, HeaderValue, ProposalType,
  Rootname, SchemaCatalog, TableId,
};

use crate::{encode::encode, schema, Error, Result};

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Identity of a newly seen (or re-seen) observation.
#[derive(Debug, Clone)]
pub struct NewObservation {
  pub rootname:      Rootname,
  /// Path of the rootname directory, relative to the filesystem root.
  pub path:          String,
  pub detector:      Detector,
  pub proposid:      Option<u32>,
  pub proposal_type: Option<ProposalType>,
}

/// One header table row: key columns plus declared keyword values.
#[derive(Debug, Clone)]
pub struct HeaderRow {
  pub rootname: Rootname,
  pub filename: String,
  /// `(column, value)` pairs, column names already lowercase.
  pub values:   Vec<(String, HeaderValue)>,
}

/// A `master` row as stored, for reads.
#[derive(Debug, Clone)]
pub struct ObservationRow {
  pub rootname:          String,
  pub path:              String,
  pub first_ingest_date: String,
  pub last_ingest_date:  String,
  pub detector:          String,
  pub proposid:          Option<i64>,
  pub proposal_type:     Option<String>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An observation archive backed by a single SQLite file.
///
/// One connection per worker; WAL mode and the busy timeout handle the
/// cross-worker write contention.
pub struct SqliteStore {
  conn:    rusqlite::Connection,
  catalog: Arc<SchemaCatalog>,
}

impl SqliteStore {
  /// Open (or create) the archive at `path` and run schema initialisation.
  pub fn open(
    path: impl AsRef<Path>,
    catalog: Arc<SchemaCatalog>,
  ) -> Result<Self> {
    Self::init(rusqlite::Connection::open(path)?, catalog)
  }

  /// Open an in-memory archive, useful for testing.
  pub fn open_in_memory(catalog: Arc<SchemaCatalog>) -> Result<Self> {
    Self::init(rusqlite::Connection::open_in_memory()?, catalog)
  }

  fn init(
    conn: rusqlite::Connection,
    catalog: Arc<SchemaCatalog>,
  ) -> Result<Self> {
    conn.execute_batch(&schema::ddl(&catalog))?;
    Ok(Self { conn, catalog })
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Record an observation in `master`.
  ///
  /// On re-ingest only `path` and `last_ingest_date` are refreshed;
  /// `first_ingest_date` is immutable and the proposal columns are filled
  /// only if they are still NULL.
  pub fn upsert_observation(&self, obs: &NewObservation) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    self
      .conn
      .execute(
        "INSERT INTO master (
           rootname, path, first_ingest_date, last_ingest_date,
           detector, proposid, proposal_type
         ) VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6)
         ON CONFLICT (rootname) DO UPDATE SET
           path             = excluded.path,
           last_ingest_date = excluded.last_ingest_date,
           proposid         = COALESCE(master.proposid, excluded.proposid),
           proposal_type    = COALESCE(master.proposal_type, excluded.proposal_type)",
        rusqlite::params![
          obs.rootname.as_str(),
          obs.path,
          now,
          obs.detector.to_string(),
          obs.proposid,
          obs.proposal_type.map(|t| t.to_string()),
        ],
      )
      .map_err(|e| constraint_err("master", obs.rootname.as_str(), e))?;
    Ok(())
  }

  /// Record (or refresh) one filetype column of the `datasets` row.
  pub fn upsert_dataset(
    &self,
    rootname: &Rootname,
    kind: FileKind,
    filename: &str,
  ) -> Result<()> {
    // `kind` renders from a closed enum; splicing it is safe.
    let column = kind.to_string();
    let sql = format!(
      "INSERT INTO datasets (rootname, {column}) VALUES (?1, ?2)
       ON CONFLICT (rootname) DO UPDATE SET {column} = excluded.{column}"
    );
    self
      .conn
      .execute(&sql, rusqlite::params![rootname.as_str(), filename])
      .map_err(|e| constraint_err("datasets", rootname.as_str(), e))?;
    Ok(())
  }

  /// Upsert one header table row. Columns not present in `row` keep their
  /// existing values; the merge is additive.
  pub fn upsert_header(&self, table: &TableId, row: &HeaderRow) -> Result<()> {
    let name = table.to_string();
    let def = self.catalog.table(table).ok_or_else(|| {
      Error::Core(obscat_core::Error::MissingTableDef(name.clone()))
    })?;

    let mut columns = vec!["rootname", "filename"];
    let mut values = vec![
      Value::Text(row.rootname.as_str().to_string()),
      Value::Text(row.filename.clone()),
    ];
    for (column, value) in &row.values {
      let ty = def.column_type(column).ok_or_else(|| Error::UnknownColumn {
        table:  name.clone(),
        column: column.clone(),
      })?;
      values.push(encode(&name, column, ty, value)?);
      columns.push(column);
    }

    self.execute_upsert(&name, &columns, values, "rootname", 1, row.rootname.as_str())
  }

  /// Upsert one indexed drizzle parameter group.
  pub fn upsert_drizzle(
    &self,
    rootname: &Rootname,
    index: u32,
    fields: &[(String, HeaderValue)],
  ) -> Result<()> {
    let mut columns = vec!["rootname", "drizzle_index"];
    let mut values = vec![
      Value::Text(rootname.as_str().to_string()),
      Value::Integer(i64::from(index)),
    ];
    for (field, value) in fields {
      let ty =
        drizzle_field_type(field).ok_or_else(|| Error::UnknownColumn {
          table:  "drizzle_data".to_string(),
          column: field.clone(),
        })?;
      values.push(encode("drizzle_data", field, ty, value)?);
      columns.push(field);
    }

    self.execute_upsert(
      "drizzle_data",
      &columns,
      values,
      "rootname, drizzle_index",
      2,
      rootname.as_str(),
    )
  }

  /// Build and run a dynamic single-statement upsert. The first `key_count`
  /// columns form the conflict target and are never updated.
  fn execute_upsert(
    &self,
    table: &str,
    columns: &[&str],
    values: Vec<Value>,
    conflict: &str,
    key_count: usize,
    rootname: &str,
  ) -> Result<()> {
    let placeholders: Vec<String> =
      (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let updates: Vec<String> = columns[key_count..]
      .iter()
      .map(|c| format!("{c} = excluded.{c}"))
      .collect();

    let sql = if updates.is_empty() {
      format!(
        "INSERT INTO {table} ({}) VALUES ({})
         ON CONFLICT ({conflict}) DO NOTHING",
        columns.join(", "),
        placeholders.join(", "),
      )
    } else {
      format!(
        "INSERT INTO {table} ({}) VALUES ({})
         ON CONFLICT ({conflict}) DO UPDATE SET {}",
        columns.join(", "),
        placeholders.join(", "),
        updates.join(", "),
      )
    };

    self
      .conn
      .execute(&sql, rusqlite::params_from_iter(values))
      .map_err(|e| constraint_err(table, rootname, e))?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All rootnames already present in `master`.
  pub fn known_rootnames(&self) -> Result<HashSet<String>> {
    let mut stmt = self.conn.prepare("SELECT rootname FROM master")?;
    let rows = stmt
      .query_map([], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<HashSet<_>>>()?;
    Ok(rows)
  }

  /// The `master` row for `rootname`, if any.
  pub fn observation(&self, rootname: &str) -> Result<Option<ObservationRow>> {
    let row = self
      .conn
      .query_row(
        "SELECT rootname, path, first_ingest_date, last_ingest_date,
                detector, proposid, proposal_type
         FROM master WHERE rootname = ?1",
        rusqlite::params![rootname],
        |row| {
          Ok(ObservationRow {
            rootname:          row.get(0)?,
            path:              row.get(1)?,
            first_ingest_date: row.get(2)?,
            last_ingest_date:  row.get(3)?,
            detector:          row.get(4)?,
            proposid:          row.get(5)?,
            proposal_type:     row.get(6)?,
          })
        },
      )
      .optional()?;
    Ok(row)
  }

  /// The filename recorded for one filetype category, if any.
  pub fn dataset_filename(
    &self,
    rootname: &str,
    kind: FileKind,
  ) -> Result<Option<String>> {
    let sql = format!("SELECT {kind} FROM datasets WHERE rootname = ?1");
    let value: Option<Option<String>> = self
      .conn
      .query_row(&sql, rusqlite::params![rootname], |row| row.get(0))
      .optional()?;
    Ok(value.flatten())
  }

  /// One header table cell, validated against the catalog before splicing.
  pub fn header_value(
    &self,
    table: &str,
    rootname: &str,
    column: &str,
  ) -> Result<Option<Value>> {
    let valid = column == "filename"
      || self.catalog.get(table).is_some_and(|def| def.contains(column));
    if self.catalog.get(table).is_none() || !valid {
      return Err(Error::UnknownColumn {
        table:  table.to_string(),
        column: column.to_string(),
      });
    }
    let sql = format!("SELECT {column} FROM {table} WHERE rootname = ?1");
    let value: Option<Value> = self
      .conn
      .query_row(&sql, rusqlite::params![rootname], |row| row.get(0))
      .optional()?;
    Ok(value.filter(|v| !matches!(v, Value::Null)))
  }

  /// One drizzle parameter cell.
  pub fn drizzle_value(
    &self,
    rootname: &str,
    index: u32,
    field: &str,
  ) -> Result<Option<Value>> {
    if drizzle_field_type(field).is_none() {
      return Err(Error::UnknownColumn {
        table:  "drizzle_data".to_string(),
        column: field.to_string(),
      });
    }
    let sql = format!(
      "SELECT {field} FROM drizzle_data
       WHERE rootname = ?1 AND drizzle_index = ?2"
    );
    let value: Option<Value> = self
      .conn
      .query_row(&sql, rusqlite::params![rootname, index], |row| row.get(0))
      .optional()?;
    Ok(value.filter(|v| !matches!(v, Value::Null)))
  }
}

/// Classify constraint violations separately; they are recoverable per-row.
fn constraint_err(table: &str, rootname: &str, err: rusqlite::Error) -> Error {
  let is_constraint = matches!(
    &err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  );
  if is_constraint {
    Error::Constraint {
      table:    table.to_string(),
      rootname: rootname.to_string(),
      source:   err,
    }
  } else {
    Error::Database(err)
  }
}
