//! Column types declared by the schema catalog and the typed header values
//! read out of FITS cards.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{Error, Result};

// ─── ColumnType ──────────────────────────────────────────────────────────────

/// The declared type of a header table column, as spelled in the
/// table-definition resources.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize,
)]
pub enum ColumnType {
  Integer,
  /// Bounded text.
  String,
  Float,
  /// Higher-precision float (stored the same way, declared separately in the
  /// definition resources).
  Decimal,
  Date,
  Time,
  DateTime,
  Bool,
}

impl ColumnType {
  /// Parse the definition-resource spelling (`Integer`, `String`, ...).
  pub fn parse(table: &str, keyword: &str, spec: &str) -> Result<Self> {
    match spec {
      "Integer" => Ok(Self::Integer),
      "String" => Ok(Self::String),
      "Float" => Ok(Self::Float),
      "Decimal" => Ok(Self::Decimal),
      "Date" => Ok(Self::Date),
      "Time" => Ok(Self::Time),
      "DateTime" => Ok(Self::DateTime),
      "Bool" => Ok(Self::Bool),
      other => Err(Error::UnknownColumnType {
        table:   table.to_string(),
        keyword: keyword.to_string(),
        spec:    other.to_string(),
      }),
    }
  }
}

// ─── HeaderValue ─────────────────────────────────────────────────────────────

/// A typed value read from one header card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HeaderValue {
  Int(i64),
  Float(f64),
  Text(String),
  Logical(bool),
}

impl HeaderValue {
  /// Empty-string values carry no information and are dropped before
  /// validation.
  pub fn is_empty(&self) -> bool {
    matches!(self, Self::Text(s) if s.is_empty())
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      Self::Int(i) => Some(*i),
      _ => None,
    }
  }
}

impl fmt::Display for HeaderValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(i) => write!(f, "{i}"),
      Self::Float(x) => write!(f, "{x}"),
      Self::Text(s) => f.write_str(s),
      Self::Logical(b) => f.write_str(if *b { "T" } else { "F" }),
    }
  }
}
