//! obscat batch ingestion binary.
//!
//! Reads `config.toml` (or the path given with `--config`), builds the
//! worklist (an explicit rootname list or a filesystem-vs-database diff),
//! and ingests each rootname on a fixed-size pool of blocking workers.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use obscat_core::SchemaCatalog;
use obscat_ingest::{
  discover, IngestOutcome, Ingester, KindFilter, Settings,
};
use obscat_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Observation archive batch ingester")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Restrict the run to one filetype category (`raw`, `flt`, ...).
  #[arg(long, default_value = "all")]
  filetype: String,

  /// Ingest the rootnames listed in this file (one per line) instead of
  /// discovering new ones.
  #[arg(long)]
  rootname_list: Option<PathBuf>,

  /// Override the configured worker count.
  #[arg(long)]
  workers: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let filter: KindFilter =
    cli.filetype.parse().context("invalid --filetype")?;

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("OBSCAT"))
    .build()
    .context("failed to read config file")?;
  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let workers = cli.workers.unwrap_or(settings.workers).max(1);

  // Load-or-die: there is no safe degraded mode for an undefined schema.
  let catalog = Arc::new(
    SchemaCatalog::load().context("schema catalog failed to load")?,
  );
  info!(
    version = env!("CARGO_PKG_VERSION"),
    tables = catalog.len(),
    workers,
    "obscat starting"
  );

  let worklist = build_worklist(&settings, &catalog, cli.rootname_list)
    .await
    .context("failed to build worklist")?;
  info!(rootnames = worklist.len(), "worklist built");

  // Each rootname runs start to finish on one blocking worker with its own
  // store connection; the semaphore bounds concurrency.
  let semaphore = Arc::new(Semaphore::new(workers));
  let settings = Arc::new(settings);
  let mut tasks = JoinSet::new();

  for dir in worklist {
    let permit = semaphore.clone().acquire_owned().await?;
    let settings = settings.clone();
    let catalog = catalog.clone();
    tasks.spawn(async move {
      let label = dir.display().to_string();
      let result = tokio::task::spawn_blocking(move || {
        // Built on the blocking thread: the ingester's HTTP client must
        // not be constructed in async context.
        let ingester = Ingester::new(&settings, catalog, filter)?;
        ingester.ingest_dir(&dir)
      })
      .await;
      drop(permit);
      (label, result)
    });
  }

  let mut ingested = 0usize;
  let mut skipped = 0usize;
  let mut failed = 0usize;
  while let Some(joined) = tasks.join_next().await {
    let (label, result) = joined.context("worker task panicked")?;
    match result {
      Ok(Ok(IngestOutcome::Ingested)) => ingested += 1,
      Ok(Ok(IngestOutcome::Skipped)) => skipped += 1,
      Ok(Err(err)) => {
        failed += 1;
        error!(dir = %label, %err, "rootname abandoned");
      }
      Err(join_err) => {
        failed += 1;
        error!(dir = %label, %join_err, "worker panicked");
      }
    }
  }

  info!(ingested, skipped, failed, "batch complete");
  Ok(())
}

/// Resolve the explicit rootname list, or diff the archive tree against the
/// rootnames already in the database.
async fn build_worklist(
  settings: &Settings,
  catalog: &Arc<SchemaCatalog>,
  list: Option<PathBuf>,
) -> anyhow::Result<Vec<PathBuf>> {
  let settings = settings.clone();
  let catalog = catalog.clone();
  let worklist =
    tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<PathBuf>> {
      match list {
        Some(list) => Ok(discover::rootname_dirs_from_list(
          &settings.filesystem,
          &list,
        )?),
        None => {
          let store = SqliteStore::open(&settings.database, catalog)?;
          let known = store.known_rootnames()?;
          Ok(discover::discover_new(&settings.filesystem, &known)?)
        }
      }
    })
    .await
    .context("worklist task panicked")??;
  Ok(worklist)
}
