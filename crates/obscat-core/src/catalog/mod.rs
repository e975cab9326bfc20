//! The schema catalog: the authoritative, read-only mapping from header
//! table to declared column set.
//!
//! Definitions are embedded at build time from versioned `KEYWORD, Type`
//! text resources (one per table). The catalog is built once at process
//! start; a missing or malformed resource is a startup failure, because
//! there is no safe degraded mode for an undefined schema.

mod defs;

use std::collections::{BTreeMap, HashMap};

use strum::IntoEnumIterator;

use crate::{
  exts::extensions_for, ColumnType, Detector, Error, FileKind, Result,
  TableId,
};

// ─── TableDef ────────────────────────────────────────────────────────────────

/// The declared column set of one header table.
///
/// Column names are stored lowercase, in declaration order. The mandatory
/// `rootname` and `filename` key columns are implied by every table and do
/// not appear here.
#[derive(Debug, Clone)]
pub struct TableDef {
  name:    String,
  columns: Vec<(String, ColumnType)>,
  types:   HashMap<String, ColumnType>,
}

impl TableDef {
  fn parse(name: &str, source: &str) -> Result<Self> {
    let mut columns = Vec::new();
    let mut types: HashMap<String, ColumnType> = HashMap::new();

    for line in source.lines() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let (keyword, spec) =
        line.split_once(',').ok_or_else(|| Error::MalformedDefinition {
          table: name.to_string(),
          line:  line.to_string(),
        })?;
      let column = keyword.trim().to_ascii_lowercase().replace('-', "_");
      let ty = ColumnType::parse(name, &column, spec.trim())?;

      match types.get(&column) {
        Some(existing) if *existing != ty => {
          return Err(Error::ConflictingColumnType {
            table:     name.to_string(),
            keyword:   column,
            existing:  *existing,
            requested: ty,
          });
        }
        Some(_) => {} // benign duplicate
        None => {
          types.insert(column.clone(), ty);
          columns.push((column, ty));
        }
      }
    }

    Ok(Self { name: name.to_string(), columns, types })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Is `column` (lowercase) part of the declared set?
  pub fn contains(&self, column: &str) -> bool {
    self.types.contains_key(column)
  }

  pub fn column_type(&self, column: &str) -> Option<ColumnType> {
    self.types.get(column).copied()
  }

  /// Declared columns in declaration order.
  pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
    self.columns.iter().map(|(c, t)| (c.as_str(), *t))
  }

  pub fn len(&self) -> usize {
    self.columns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.columns.is_empty()
  }
}

// ─── SchemaCatalog ───────────────────────────────────────────────────────────

/// All table definitions, keyed by table name (`wfc_raw_0`).
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
  tables: BTreeMap<String, TableDef>,
}

impl SchemaCatalog {
  /// Build the catalog from the embedded definition resources and verify
  /// that every declared (detector, filetype, extension) triple is covered.
  pub fn load() -> Result<Self> {
    let catalog = Self::from_sources(defs::TABLE_DEFS)?;
    catalog.check_coverage()?;
    Ok(catalog)
  }

  /// Build from explicit `(table_name, definition_text)` pairs.
  pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self> {
    let mut tables = BTreeMap::new();
    for (name, source) in sources {
      tables.insert(name.to_string(), TableDef::parse(name, source)?);
    }
    Ok(Self { tables })
  }

  fn check_coverage(&self) -> Result<()> {
    for detector in Detector::iter() {
      for kind in FileKind::iter() {
        let Some(exts) = extensions_for(detector, kind) else {
          continue;
        };
        for &ext in exts {
          let id = TableId::new(detector, kind, ext);
          if !self.tables.contains_key(&id.to_string()) {
            return Err(Error::MissingTableDef(id.to_string()));
          }
        }
      }
    }
    Ok(())
  }

  pub fn table(&self, id: &TableId) -> Option<&TableDef> {
    self.tables.get(&id.to_string())
  }

  pub fn get(&self, name: &str) -> Option<&TableDef> {
    self.tables.get(name)
  }

  /// All definitions, ordered by table name.
  pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
    self.tables.values()
  }

  pub fn len(&self) -> usize {
    self.tables.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tables.is_empty()
  }
}
