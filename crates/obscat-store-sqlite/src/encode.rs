//! Bind-time coercion of header values to declared column types.
//!
//! SQLite column affinities do not enforce anything, so type discipline is
//! applied here: a value that cannot be coerced yields a recoverable
//! [`Error::TypeMismatch`] and the row is skipped by the caller.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use obscat_core::{ColumnType, HeaderValue};
use rusqlite::types::Value;

use crate::{Error, Result};

/// Coerce `value` to the declared `ty`, producing the SQLite value to bind.
pub fn encode(
  table: &str,
  keyword: &str,
  ty: ColumnType,
  value: &HeaderValue,
) -> Result<Value> {
  let mismatch = || Error::TypeMismatch {
    table:    table.to_string(),
    keyword:  keyword.to_string(),
    expected: ty,
    value:    value.to_string(),
  };

  let encoded = match ty {
    ColumnType::Integer => match value {
      HeaderValue::Int(i) => Value::Integer(*i),
      HeaderValue::Logical(b) => Value::Integer(*b as i64),
      HeaderValue::Text(s) => {
        Value::Integer(s.trim().parse().map_err(|_| mismatch())?)
      }
      HeaderValue::Float(_) => return Err(mismatch()),
    },

    ColumnType::Float | ColumnType::Decimal => match value {
      HeaderValue::Float(x) => Value::Real(*x),
      HeaderValue::Int(i) => Value::Real(*i as f64),
      HeaderValue::Text(s) => {
        Value::Real(s.trim().parse().map_err(|_| mismatch())?)
      }
      HeaderValue::Logical(_) => return Err(mismatch()),
    },

    ColumnType::Bool => match value {
      HeaderValue::Logical(b) => Value::Integer(*b as i64),
      HeaderValue::Int(i @ (0 | 1)) => Value::Integer(*i),
      HeaderValue::Text(s) if s == "T" => Value::Integer(1),
      HeaderValue::Text(s) if s == "F" => Value::Integer(0),
      _ => return Err(mismatch()),
    },

    ColumnType::Date => {
      let s = value.as_str().ok_or_else(mismatch)?;
      NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| mismatch())?;
      Value::Text(s.to_string())
    }

    ColumnType::Time => {
      let s = value.as_str().ok_or_else(mismatch)?;
      NaiveTime::parse_from_str(s, "%H:%M:%S%.f").map_err(|_| mismatch())?;
      Value::Text(s.to_string())
    }

    ColumnType::DateTime => {
      let s = value.as_str().ok_or_else(mismatch)?;
      parse_datetime(s).ok_or_else(mismatch)?;
      Value::Text(s.to_string())
    }

    ColumnType::String => Value::Text(value.to_string()),
  };

  Ok(encoded)
}

/// Headers carry both ISO `T`-separated and space-separated timestamps.
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
    .ok()
}
