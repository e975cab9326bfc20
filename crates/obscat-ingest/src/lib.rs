//! The ingestion pipeline: discovery, identity resolution, proposal
//! classification, header extraction, and the per-rootname orchestrator.
//!
//! Everything here is synchronous. One [`Ingester`] serves one worker and
//! owns its store connection; workers never share a rootname.

pub mod context;
pub mod discover;
pub mod drizzle;
pub mod error;
pub mod ingest;
pub mod preview;
pub mod proposal;
pub mod resolve;
pub mod settings;

pub use error::{Error, Result};
pub use ingest::{IngestOutcome, Ingester, KindFilter};
pub use settings::Settings;

#[cfg(test)]
mod tests;
