//! Store behaviour tests against an in-memory archive.

use std::sync::Arc;

use rusqlite::types::Value;

use obscat_core::{
  Detector, FileKind, HeaderValue, ProposalType, Rootname, SchemaCatalog,
  TableId,
};

use crate::{Error, HeaderRow, NewObservation, SqliteStore};

fn catalog() -> Arc<SchemaCatalog> {
  Arc::new(SchemaCatalog::load().unwrap())
}

fn store() -> SqliteStore {
  SqliteStore::open_in_memory(catalog()).unwrap()
}

fn rootname(s: &str) -> Rootname {
  Rootname::new(s).unwrap()
}

fn observation(root: &str, proposid: Option<u32>) -> NewObservation {
  NewObservation {
    rootname:      rootname(root),
    path:          format!("j8cw/{root}"),
    detector:      Detector::Wfc,
    proposid,
    proposal_type: proposid.map(|_| ProposalType::Go),
  }
}

fn header_row(root: &str, filename: &str, values: &[(&str, HeaderValue)]) -> HeaderRow {
  HeaderRow {
    rootname: rootname(root),
    filename: filename.to_string(),
    values:   values
      .iter()
      .map(|(c, v)| (c.to_string(), v.clone()))
      .collect(),
  }
}

// ─── master ──────────────────────────────────────────────────────────────────

#[test]
fn reingest_updates_last_date_and_backfills_proposal() {
  let store = store();

  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();
  let first = store.observation("j8cw54ot").unwrap().unwrap();
  assert_eq!(first.proposid, None);
  assert_eq!(first.proposal_type, None);

  // Proposal metadata resolved on a later pass fills the NULLs.
  store.upsert_observation(&observation("j8cw54ot", Some(10258))).unwrap();
  let second = store.observation("j8cw54ot").unwrap().unwrap();
  assert_eq!(second.proposid, Some(10258));
  assert_eq!(second.proposal_type.as_deref(), Some("GO"));
  assert_eq!(second.first_ingest_date, first.first_ingest_date);

  // Once filled, the proposal columns are stable.
  store.upsert_observation(&observation("j8cw54ot", Some(99999))).unwrap();
  let third = store.observation("j8cw54ot").unwrap().unwrap();
  assert_eq!(third.proposid, Some(10258));
}

#[test]
fn known_rootnames_reflects_master() {
  let store = store();
  assert!(store.known_rootnames().unwrap().is_empty());

  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();
  store.upsert_observation(&observation("j8cw5501", None)).unwrap();

  let known = store.known_rootnames().unwrap();
  assert_eq!(known.len(), 2);
  assert!(known.contains("j8cw54ot"));
}

#[test]
fn archive_persists_across_connections() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("obscat.db");
  let catalog = catalog();

  {
    let store = SqliteStore::open(&path, catalog.clone()).unwrap();
    store.upsert_observation(&observation("j8cw54ot", None)).unwrap();
  }

  let store = SqliteStore::open(&path, catalog).unwrap();
  assert!(store.known_rootnames().unwrap().contains("j8cw54ot"));
}

// ─── datasets ────────────────────────────────────────────────────────────────

#[test]
fn dataset_columns_accumulate_per_filetype() {
  let store = store();
  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();

  let root = rootname("j8cw54ot");
  store.upsert_dataset(&root, FileKind::Raw, "j8cw54otq_raw.fits").unwrap();
  store.upsert_dataset(&root, FileKind::Flt, "j8cw54otq_flt.fits").unwrap();

  assert_eq!(
    store.dataset_filename("j8cw54ot", FileKind::Raw).unwrap().as_deref(),
    Some("j8cw54otq_raw.fits")
  );
  assert_eq!(
    store.dataset_filename("j8cw54ot", FileKind::Flt).unwrap().as_deref(),
    Some("j8cw54otq_flt.fits")
  );
  assert_eq!(store.dataset_filename("j8cw54ot", FileKind::Drz).unwrap(), None);
}

// ─── header tables ───────────────────────────────────────────────────────────

#[test]
fn header_upsert_merges_instead_of_replacing() {
  let store = store();
  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();

  let table = TableId::new(Detector::Wfc, FileKind::Raw, 0);
  store
    .upsert_header(
      &table,
      &header_row(
        "j8cw54ot",
        "j8cw54otq_raw.fits",
        &[
          ("detector", HeaderValue::Text("WFC".into())),
          ("proposid", HeaderValue::Int(10258)),
        ],
      ),
    )
    .unwrap();

  // A later pass carrying a different subset leaves earlier columns intact.
  store
    .upsert_header(
      &table,
      &header_row(
        "j8cw54ot",
        "j8cw54otq_raw.fits",
        &[("exptime", HeaderValue::Float(100.0))],
      ),
    )
    .unwrap();

  assert_eq!(
    store.header_value("wfc_raw_0", "j8cw54ot", "detector").unwrap(),
    Some(Value::Text("WFC".into()))
  );
  assert_eq!(
    store.header_value("wfc_raw_0", "j8cw54ot", "proposid").unwrap(),
    Some(Value::Integer(10258))
  );
  assert_eq!(
    store.header_value("wfc_raw_0", "j8cw54ot", "exptime").unwrap(),
    Some(Value::Real(100.0))
  );
}

#[test]
fn duplicate_filename_is_a_recoverable_constraint() {
  let store = store();
  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();
  store.upsert_observation(&observation("j8cw5501", None)).unwrap();

  let table = TableId::new(Detector::Wfc, FileKind::Raw, 0);
  store
    .upsert_header(&table, &header_row("j8cw54ot", "shared_raw.fits", &[]))
    .unwrap();

  let err = store
    .upsert_header(&table, &header_row("j8cw5501", "shared_raw.fits", &[]))
    .unwrap_err();
  assert!(matches!(err, Error::Constraint { .. }));
  assert!(err.is_recoverable());
}

#[test]
fn header_row_without_master_row_is_rejected() {
  let store = store();
  let table = TableId::new(Detector::Wfc, FileKind::Raw, 0);
  let err = store
    .upsert_header(&table, &header_row("j8cw54ot", "j8cw54otq_raw.fits", &[]))
    .unwrap_err();
  assert!(matches!(err, Error::Constraint { .. }));
}

#[test]
fn untypeable_value_is_a_recoverable_mismatch() {
  let store = store();
  store.upsert_observation(&observation("j8cw54ot", None)).unwrap();

  let table = TableId::new(Detector::Wfc, FileKind::Raw, 0);
  let err = store
    .upsert_header(
      &table,
      &header_row(
        "j8cw54ot",
        "j8cw54otq_raw.fits",
        &[("exptime", HeaderValue::Text("abc".into()))],
      ),
    )
    .unwrap_err();
  assert!(matches!(err, Error::TypeMismatch { .. }));
  assert!(err.is_recoverable());
}

// ─── drizzle_data ────────────────────────────────────────────────────────────

#[test]
fn drizzle_groups_key_on_rootname_and_index() {
  let store = store();
  store.upsert_observation(&observation("j8cw5401", None)).unwrap();
  let root = rootname("j8cw5401");

  store
    .upsert_drizzle(
      &root,
      1,
      &[
        ("data".to_string(), HeaderValue::Text("j8cw54ouq_flt.fits".into())),
        ("scal".to_string(), HeaderValue::Float(0.05)),
      ],
    )
    .unwrap();
  store
    .upsert_drizzle(
      &root,
      2,
      &[("data".to_string(), HeaderValue::Text("j8cw54ovq_flt.fits".into()))],
    )
    .unwrap();
  // Re-ingesting index 1 refreshes its fields.
  store
    .upsert_drizzle(&root, 1, &[("scal".to_string(), HeaderValue::Float(0.1))])
    .unwrap();

  assert_eq!(
    store.drizzle_value("j8cw5401", 1, "scal").unwrap(),
    Some(Value::Real(0.1))
  );
  assert_eq!(
    store.drizzle_value("j8cw5401", 1, "data").unwrap(),
    Some(Value::Text("j8cw54ouq_flt.fits".into()))
  );
  assert_eq!(
    store.drizzle_value("j8cw5401", 2, "data").unwrap(),
    Some(Value::Text("j8cw54ovq_flt.fits".into()))
  );
  assert_eq!(store.drizzle_value("j8cw5401", 3, "data").unwrap(), None);
}
