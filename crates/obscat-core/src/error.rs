//! Error types for `obscat-core`.

use thiserror::Error;

use crate::value::ColumnType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid rootname: {0:?}")]
  InvalidRootname(String),

  #[error("unknown detector: {0:?}")]
  UnknownDetector(String),

  #[error("unknown filetype: {0:?}")]
  UnknownFiletype(String),

  #[error("unknown proposal type: {0:?}")]
  UnknownProposalType(String),

  /// A line in a table-definition resource that is not `KEYWORD, Type`.
  #[error("malformed definition line in {table}: {line:?}")]
  MalformedDefinition { table: String, line: String },

  #[error("unknown column type {spec:?} for {keyword} in {table}")]
  UnknownColumnType {
    table:   String,
    keyword: String,
    spec:    String,
  },

  /// The same keyword declared twice with different types is a deploy-time
  /// mistake; there is no safe way to pick one at ingest time.
  #[error(
    "conflicting types for {keyword} in {table}: {existing} vs {requested}"
  )]
  ConflictingColumnType {
    table:     String,
    keyword:   String,
    existing:  ColumnType,
    requested: ColumnType,
  },

  /// A (detector, filetype, extension) triple is declared ingestable but has
  /// no definition resource. Startup must fail rather than ingest blind.
  #[error("no table definition for {0}")]
  MissingTableDef(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
