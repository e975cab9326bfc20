//! The per-rootname ingestion orchestrator.

use std::{path::Path, str::FromStr, sync::Arc, time::Duration};

use tracing::{info, warn};

use obscat_core::{
  extensions_for, extname_ingestable, Detector, FileKind, SchemaCatalog,
  TableId,
};
use obscat_fits::{Fits, Header};
use obscat_store_sqlite::{HeaderRow, NewObservation, SqliteStore};

use crate::{
  context::{FileContext, ObsFile},
  drizzle::DrizzleAccumulator,
  preview::{ensure_parent, DisabledPreviews, PreviewLayout, PreviewRenderer},
  proposal::ProposalClassifier,
  resolve::resolve,
  settings::Settings,
  Error, Result,
};

// ─── KindFilter ──────────────────────────────────────────────────────────────

/// Restrict an ingestion run to one filetype category, or take all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
  All,
  Only(FileKind),
}

impl KindFilter {
  pub fn admits(self, kind: FileKind) -> bool {
    match self {
      Self::All => true,
      Self::Only(k) => k == kind,
    }
  }
}

impl FromStr for KindFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s.eq_ignore_ascii_case("all") {
      Ok(Self::All)
    } else {
      FileKind::parse(s)
        .map(Self::Only)
        .map_err(|_| Error::UnknownFilter(s.to_string()))
    }
  }
}

// ─── Ingester ────────────────────────────────────────────────────────────────

/// What happened to one rootname.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
  Ingested,
  /// No detector could be resolved; nothing was written. Re-running later
  /// (once more files land) is expected to succeed.
  Skipped,
}

/// Drives the full per-rootname pipeline:
/// resolve → classify → upsert observation → per-file header extraction,
/// validation, and upserts → previews.
///
/// One ingester per worker. It owns a store connection, and a rootname is
/// owned by exactly one worker end to end, so header upserts for one
/// rootname never race.
pub struct Ingester {
  store:      SqliteStore,
  catalog:    Arc<SchemaCatalog>,
  classifier: Option<ProposalClassifier>,
  previews:   PreviewLayout,
  renderer:   Arc<dyn PreviewRenderer>,
  filter:     KindFilter,
}

impl Ingester {
  pub fn new(
    settings: &Settings,
    catalog: Arc<SchemaCatalog>,
    filter: KindFilter,
  ) -> Result<Self> {
    Self::with_renderer(settings, catalog, filter, Arc::new(DisabledPreviews))
  }

  pub fn with_renderer(
    settings: &Settings,
    catalog: Arc<SchemaCatalog>,
    filter: KindFilter,
    renderer: Arc<dyn PreviewRenderer>,
  ) -> Result<Self> {
    let store = SqliteStore::open(&settings.database, catalog.clone())?;
    let classifier = settings.proposal_status_url.as_deref().and_then(|url| {
      ProposalClassifier::new(
        url,
        Duration::from_secs(settings.proposal_timeout_secs),
      )
    });
    let previews = PreviewLayout::new(
      settings.jpeg_dir.clone(),
      settings.thumbnail_dir.clone(),
    );
    Ok(Self { store, catalog, classifier, previews, renderer, filter })
  }

  pub fn store(&self) -> &SqliteStore {
    &self.store
  }

  /// Run the full state machine for the rootname directory at `dir`.
  ///
  /// File-level and row-level failures are logged and do not abort the
  /// rootname; an `Err` here means the rootname was abandoned mid-pipeline
  /// (partially-ingested state is safe to resume).
  pub fn ingest_dir(&self, dir: &Path) -> Result<IngestOutcome> {
    let ctx = FileContext::scan(dir)?;
    info!(rootname = %ctx.rootname, files = ctx.files.len(), "ingest begin");

    let resolution = resolve(&ctx);
    let Some(detector) = resolution.detector else {
      warn!(
        rootname = %ctx.rootname,
        guidance_only = resolution.guidance_only,
        "skipping rootname without detector"
      );
      return Ok(IngestOutcome::Skipped);
    };

    let proposal_type = resolution.proposid.and_then(|id| {
      self.classifier.as_ref().and_then(|c| c.classify(id))
    });

    self.store.upsert_observation(&NewObservation {
      rootname: ctx.rootname.clone(),
      path: ctx.relative_path(),
      detector,
      proposid: resolution.proposid,
      proposal_type,
    })?;

    for file in &ctx.files {
      if !self.filter.admits(file.kind) {
        continue;
      }
      if let Err(err) =
        self.ingest_file(&ctx, detector, resolution.proposid, file)
      {
        warn!(
          rootname = %ctx.rootname,
          file = %file.basename,
          %err,
          "file skipped"
        );
      }
    }

    info!(rootname = %ctx.rootname, "ingest end");
    Ok(IngestOutcome::Ingested)
  }

  /// Ingest every declared extension of one file, then its dataset column
  /// and preview products.
  fn ingest_file(
    &self,
    ctx: &FileContext,
    detector: Detector,
    proposid: Option<u32>,
    file: &ObsFile,
  ) -> Result<()> {
    let Some(exts) = extensions_for(detector, file.kind) else {
      // Category not produced by this detector; nothing to ingest.
      return Ok(());
    };

    let fits = Fits::open(ctx.path_of(file))?;
    let mut drizzle = DrizzleAccumulator::default();

    for &ext in exts {
      let header = match fits.header(ext as usize) {
        Ok(h) => h,
        Err(obscat_fits::Error::ExtensionNotPresent { .. }) => continue,
        Err(err) => return Err(err.into()),
      };
      if !extension_admissible(ext, header) {
        continue;
      }

      let table = TableId::new(detector, file.kind, ext);
      let row = self.build_row(&table, ctx, file, header, &mut drizzle);
      match self.store.upsert_header(&table, &row) {
        Ok(()) => {}
        Err(err) if err.is_recoverable() => {
          warn!(
            rootname = %ctx.rootname,
            table = %table,
            %err,
            "header row skipped"
          );
        }
        Err(err) => return Err(err.into()),
      }
    }

    for (index, fields) in drizzle.into_groups() {
      match self.store.upsert_drizzle(&ctx.rootname, index, &fields) {
        Ok(()) => {}
        Err(err) if err.is_recoverable() => {
          warn!(
            rootname = %ctx.rootname,
            index,
            %err,
            "drizzle group skipped"
          );
        }
        Err(err) => return Err(err.into()),
      }
    }

    match self.store.upsert_dataset(&ctx.rootname, file.kind, &file.basename)
    {
      Ok(()) => {}
      Err(err) if err.is_recoverable() => {
        warn!(
          rootname = %ctx.rootname,
          file = %file.basename,
          %err,
          "dataset column skipped"
        );
      }
      Err(err) => return Err(err.into()),
    }

    self.generate_previews(ctx, proposid, file)
  }

  /// Build one header row, dropping keywords outside the declared schema
  /// (with a warning naming the keyword and table, for later schema
  /// maintenance) and diverting drizzle-family keywords to the accumulator.
  fn build_row(
    &self,
    table: &TableId,
    ctx: &FileContext,
    file: &ObsFile,
    header: &Header,
    drizzle: &mut DrizzleAccumulator,
  ) -> HeaderRow {
    let def = self.catalog.table(table);
    let mut values = Vec::new();

    for (keyword, value) in header.keywords() {
      if drizzle.note(keyword, value) {
        continue;
      }
      let column = keyword.to_ascii_lowercase();
      if values.iter().any(|(c, _)| c == &column) {
        // A keyword repeated within one header keeps its first value.
        continue;
      }
      match def {
        Some(def) if def.contains(&column) => {
          values.push((column, value.clone()));
        }
        _ => warn!(
          rootname = %ctx.rootname,
          table = %table,
          keyword,
          "keyword not in declared schema"
        ),
      }
    }

    HeaderRow {
      rootname: ctx.rootname.clone(),
      filename: file.basename.clone(),
      values,
    }
  }

  fn generate_previews(
    &self,
    ctx: &FileContext,
    proposid: Option<u32>,
    file: &ObsFile,
  ) -> Result<()> {
    // Preview trees are bucketed by proposal id.
    let Some(proposid) = proposid else {
      return Ok(());
    };
    let source = ctx.path_of(file);

    if file.kind.wants_jpeg() {
      if let Some(dest) = self.previews.jpeg_path(proposid, &file.basename) {
        ensure_parent(&dest)?;
        self.renderer.render(&source, &dest)?;
      }
    }
    if file.kind.wants_thumbnail() {
      if let Some(dest) =
        self.previews.thumbnail_path(proposid, &file.basename)
      {
        ensure_parent(&dest)?;
        self.renderer.render(&source, &dest)?;
      }
    }
    Ok(())
  }
}

/// The primary header carries no name tag; named extensions must be on the
/// allow-list. Anything else is skipped without error.
fn extension_admissible(ext: u32, header: &Header) -> bool {
  if ext == 0 {
    return true;
  }
  header.extname().is_some_and(extname_ingestable)
}
