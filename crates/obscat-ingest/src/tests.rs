//! Pipeline tests over synthetic archive trees.

use std::{
  collections::HashSet,
  fs,
  path::PathBuf,
  sync::Arc,
};

use rusqlite::types::Value;
use tempfile::TempDir;

use obscat_core::{Detector, FileKind, SchemaCatalog};

use crate::{
  context::FileContext,
  discover::{discover_new, rootname_dirs_from_list},
  ingest::{IngestOutcome, Ingester, KindFilter},
  resolve::resolve,
  settings::Settings,
};

const CARD_LEN: usize = 80;
const BLOCK_LEN: usize = 2880;

fn pad_card(line: &str) -> Vec<u8> {
  let mut bytes = line.as_bytes().to_vec();
  bytes.resize(CARD_LEN, b' ');
  bytes
}

fn header_block(lines: &[&str]) -> Vec<u8> {
  let mut block = Vec::new();
  for line in lines {
    block.extend(pad_card(line));
  }
  block.extend(pad_card("END"));
  while block.len() % BLOCK_LEN != 0 {
    block.push(b' ');
  }
  block
}

/// A dataless multi-HDU file: every header declares NAXIS = 0.
fn fits_file(headers: &[Vec<&str>]) -> Vec<u8> {
  let mut bytes = Vec::new();
  for (i, lines) in headers.iter().enumerate() {
    let mut cards: Vec<&str> = if i == 0 {
      vec!["SIMPLE  =                    T", "BITPIX  =                    8"]
    } else {
      vec!["XTENSION= 'IMAGE   '", "BITPIX  =                   16"]
    };
    cards.push("NAXIS   =                    0");
    cards.extend(lines.iter().copied());
    bytes.extend(header_block(&cards));
  }
  bytes
}

struct Archive {
  tmp:  TempDir,
  root: PathBuf,
}

impl Archive {
  fn new() -> Self {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("archive");
    fs::create_dir_all(&root).unwrap();
    Self { tmp, root }
  }

  /// Write one file under `<root>/<prefix>/<fullname>/` and return the
  /// rootname directory.
  fn write_file(
    &self,
    fullname: &str,
    basename: &str,
    bytes: &[u8],
  ) -> PathBuf {
    let dir = self.root.join(&fullname[..4]).join(fullname);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(basename), bytes).unwrap();
    dir
  }

  fn settings(&self) -> Settings {
    Settings {
      filesystem:            self.root.clone(),
      database:              self.tmp.path().join("obscat.db"),
      jpeg_dir:              None,
      thumbnail_dir:         None,
      workers:               1,
      proposal_status_url:   None,
      proposal_timeout_secs: 1,
    }
  }
}

fn catalog() -> Arc<SchemaCatalog> {
  Arc::new(SchemaCatalog::load().unwrap())
}

fn ingester(archive: &Archive, filter: KindFilter) -> Ingester {
  Ingester::new(&archive.settings(), catalog(), filter).unwrap()
}

fn wfc_raw(extra_ext1: &[&str]) -> Vec<u8> {
  let mut ext1 = vec!["EXTNAME = 'SCI     '"];
  ext1.extend(extra_ext1.iter().copied());
  fits_file(&[
    vec![
      "DETECTOR= 'WFC     '",
      "PROPOSID=                10258",
      "DATE-OBS= '2020-01-01'",
    ],
    ext1,
  ])
}

// ─── Orchestrator ────────────────────────────────────────────────────────────

#[test]
fn ingests_declared_keywords_and_drops_the_rest() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_raw.fits",
    &wfc_raw(&[
      "EXPTIME =                100.0",
      "DATE-OBS= '2020-01-01'",
      "FOOBAR  =                    1",
    ]),
  );

  let ingester = ingester(&archive, KindFilter::All);
  assert_eq!(ingester.ingest_dir(&dir).unwrap(), IngestOutcome::Ingested);

  let store = ingester.store();
  let obs = store.observation("jab01020").unwrap().unwrap();
  assert_eq!(obs.detector, "WFC");
  assert_eq!(obs.proposid, Some(10258));
  assert_eq!(obs.path, "jab0/jab010203");

  assert_eq!(
    store.header_value("wfc_raw_0", "jab01020", "detector").unwrap(),
    Some(Value::Text("WFC".into()))
  );
  assert_eq!(
    store.header_value("wfc_raw_1", "jab01020", "exptime").unwrap(),
    Some(Value::Real(100.0))
  );
  assert_eq!(
    store.header_value("wfc_raw_1", "jab01020", "date_obs").unwrap(),
    Some(Value::Text("2020-01-01".into()))
  );
  // The undeclared keyword never becomes a column.
  assert!(store.header_value("wfc_raw_1", "jab01020", "foobar").is_err());

  assert_eq!(
    store.dataset_filename("jab01020", FileKind::Raw).unwrap().as_deref(),
    Some("jab010203_raw.fits")
  );
}

#[test]
fn reingest_is_idempotent() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_raw.fits",
    &wfc_raw(&["EXPTIME =                100.0"]),
  );

  let ingester = ingester(&archive, KindFilter::All);
  ingester.ingest_dir(&dir).unwrap();
  let first = ingester.store().observation("jab01020").unwrap().unwrap();

  ingester.ingest_dir(&dir).unwrap();
  let second = ingester.store().observation("jab01020").unwrap().unwrap();

  assert_eq!(ingester.store().known_rootnames().unwrap().len(), 1);
  assert_eq!(second.first_ingest_date, first.first_ingest_date);
  assert_eq!(
    ingester.store().header_value("wfc_raw_1", "jab01020", "exptime").unwrap(),
    Some(Value::Real(100.0))
  );
}

#[test]
fn unlisted_extension_name_is_skipped_without_error() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_raw.fits",
    &fits_file(&[
      vec!["DETECTOR= 'WFC     '"],
      vec!["EXTNAME = 'EVENTS  '", "EXPTIME =                100.0"],
    ]),
  );

  let ingester = ingester(&archive, KindFilter::All);
  assert_eq!(ingester.ingest_dir(&dir).unwrap(), IngestOutcome::Ingested);
  assert_eq!(
    ingester.store().header_value("wfc_raw_1", "jab01020", "exptime").unwrap(),
    None
  );
}

#[test]
fn filetype_filter_restricts_ingested_files() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_raw.fits",
    &wfc_raw(&[]),
  );
  fs::write(
    dir.join("jab010203_flt.fits"),
    fits_file(&[vec!["DETECTOR= 'WFC     '"]]),
  )
  .unwrap();

  let ingester = ingester(&archive, KindFilter::Only(FileKind::Raw));
  ingester.ingest_dir(&dir).unwrap();

  let store = ingester.store();
  assert!(store.dataset_filename("jab01020", FileKind::Raw).unwrap().is_some());
  assert!(store.dataset_filename("jab01020", FileKind::Flt).unwrap().is_none());
}

#[test]
fn drizzle_keywords_are_grouped_not_stored_as_columns() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_drz.fits",
    &fits_file(&[vec![
      "DETECTOR= 'WFC     '",
      "D001DATA= 'a_flt.fits'",
      "D001SCAL=                 0.05",
      "D002DATA= 'b_flt.fits'",
    ]]),
  );

  let ingester = ingester(&archive, KindFilter::All);
  ingester.ingest_dir(&dir).unwrap();

  let store = ingester.store();
  assert_eq!(
    store.drizzle_value("jab01020", 1, "data").unwrap(),
    Some(Value::Text("a_flt.fits".into()))
  );
  assert_eq!(
    store.drizzle_value("jab01020", 1, "scal").unwrap(),
    Some(Value::Real(0.05))
  );
  assert_eq!(
    store.drizzle_value("jab01020", 2, "data").unwrap(),
    Some(Value::Text("b_flt.fits".into()))
  );
}

#[test]
fn guidance_only_rootname_is_skipped() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_jit.fits",
    &fits_file(&[vec!["CONFIG  = 'S/C     '"]]),
  );

  let ingester = ingester(&archive, KindFilter::All);
  assert_eq!(ingester.ingest_dir(&dir).unwrap(), IngestOutcome::Skipped);
  assert!(ingester.store().known_rootnames().unwrap().is_empty());
}

// ─── Resolver ────────────────────────────────────────────────────────────────

#[test]
fn resolution_falls_back_to_lower_priority_candidates() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_flt.fits",
    &fits_file(&[vec![
      "DETECTOR= 'HRC     '",
      "PROPOSID=                 9999",
    ]]),
  );

  let ctx = FileContext::scan(dir).unwrap();
  let resolution = resolve(&ctx);
  assert_eq!(resolution.detector, Some(Detector::Hrc));
  assert_eq!(resolution.proposid, Some(9999));
}

#[test]
fn jitter_config_yields_detector() {
  let archive = Archive::new();
  let dir = archive.write_file(
    "jab010203",
    "jab010203_jit.fits",
    &fits_file(&[vec!["CONFIG  = 'ACS/SBC '"]]),
  );

  let ctx = FileContext::scan(dir).unwrap();
  let resolution = resolve(&ctx);
  assert_eq!(resolution.detector, Some(Detector::Sbc));
  assert!(!resolution.guidance_only);
}

// ─── Discovery ───────────────────────────────────────────────────────────────

#[test]
fn discovery_diffs_tree_against_known_rootnames() {
  let archive = Archive::new();
  archive.write_file("jab010203", "jab010203_raw.fits", &wfc_raw(&[]));
  archive.write_file("jcd040506", "jcd040506_raw.fits", &wfc_raw(&[]));

  let known: HashSet<String> = ["jab01020".to_string()].into();
  let fresh = discover_new(&archive.root, &known).unwrap();
  assert_eq!(fresh.len(), 1);
  assert!(fresh[0].ends_with("jcd0/jcd040506"));
}

#[test]
fn rootname_list_resolves_to_prefixed_directories() {
  let archive = Archive::new();
  let list = archive.tmp.path().join("rootnames.txt");
  fs::write(&list, "JAB010203\n\nnot-a-rootname\njcd040506\n").unwrap();

  let dirs = rootname_dirs_from_list(&archive.root, &list).unwrap();
  assert_eq!(dirs.len(), 2);
  assert!(dirs[0].ends_with("jab0/jab010203"));
  assert!(dirs[1].ends_with("jcd0/jcd040506"));
}

// ─── KindFilter ──────────────────────────────────────────────────────────────

#[test]
fn kind_filter_parses_categories_and_all() {
  assert_eq!("all".parse::<KindFilter>().unwrap(), KindFilter::All);
  assert_eq!(
    "raw".parse::<KindFilter>().unwrap(),
    KindFilter::Only(FileKind::Raw)
  );
  assert!("trl".parse::<KindFilter>().is_err());
}
