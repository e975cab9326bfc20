//! The drizzle parameter group recorded by combined products.
//!
//! Drizzled files carry indexed keyword families such as `D001COEF`,
//! `D001DATA`, `D002COEF`, ... One index describes the drizzle parameters of
//! one input image. The fields below are the closed set of recognized
//! per-index parameters and their declared column types.

use crate::ColumnType;

/// Field suffixes of the indexed drizzle keyword family, with column types.
pub const DRIZZLE_FIELDS: &[(&str, ColumnType)] = &[
  ("coef", ColumnType::String),
  ("data", ColumnType::String),
  ("dexp", ColumnType::Float),
  ("fval", ColumnType::String),
  ("geom", ColumnType::String),
  ("iscl", ColumnType::Float),
  ("kern", ColumnType::String),
  ("mask", ColumnType::String),
  ("ouco", ColumnType::String),
  ("ouda", ColumnType::String),
  ("ouun", ColumnType::String),
  ("ouwe", ColumnType::String),
  ("pixf", ColumnType::Float),
  ("scal", ColumnType::Float),
  ("ver", ColumnType::String),
  ("wkey", ColumnType::String),
  ("wtsc", ColumnType::Float),
];

/// Look up the declared type of a drizzle field suffix (lowercase).
pub fn drizzle_field_type(field: &str) -> Option<ColumnType> {
  DRIZZLE_FIELDS
    .iter()
    .find(|(name, _)| *name == field)
    .map(|(_, ty)| *ty)
}
