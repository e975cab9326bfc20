//! Detector and proposal-id resolution by probing candidate files.

use obscat_core::{Detector, FileKind};
use obscat_fits::{Fits, Header};
use tracing::warn;

use crate::context::FileContext;

/// Filetypes probed for identity metadata, in priority order.
pub const PROBE_ORDER: &[FileKind] = &[
  FileKind::Raw,
  FileKind::Flt,
  FileKind::Spt,
  FileKind::Drz,
  FileKind::Jit,
];

/// Cross-cutting facts needed before per-file work can proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution {
  pub detector: Option<Detector>,
  pub proposid: Option<u32>,
  /// The exposure is guidance-sensor telemetry only; no detector applies
  /// and the absence is not a resolution failure.
  pub guidance_only: bool,
}

/// Probe the rootname's candidate files until both identity fields are
/// filled, or the candidates run out. Each field keeps the first value seen.
pub fn resolve(ctx: &FileContext) -> Resolution {
  let mut out = Resolution::default();

  for &kind in PROBE_ORDER {
    if out.detector.is_some() && out.proposid.is_some() {
      break;
    }
    let Some(file) = ctx.first_of(kind) else {
      continue;
    };
    let fits = match Fits::open(ctx.path_of(file)) {
      Ok(f) => f,
      Err(err) => {
        warn!(
          rootname = %ctx.rootname,
          file = %file.basename,
          %err,
          "unreadable candidate during resolution"
        );
        continue;
      }
    };
    let primary = fits.primary();

    if out.proposid.is_none() {
      out.proposid = primary
        .int_value("PROPOSID")
        .and_then(|i| u32::try_from(i).ok());
    }
    if out.detector.is_none() {
      if kind == FileKind::Jit {
        match jitter_detector(primary) {
          JitterConfig::Detector(d) => out.detector = Some(d),
          JitterConfig::GuidanceOnly => {
            out.guidance_only = true;
            break;
          }
          JitterConfig::Unknown => {}
        }
      } else {
        out.detector = primary
          .str_value("DETECTOR")
          .and_then(|s| Detector::parse(s).ok());
      }
    }
  }

  if out.detector.is_none() && !out.guidance_only {
    warn!(rootname = %ctx.rootname, "no candidate file yielded a detector");
  }
  out
}

enum JitterConfig {
  Detector(Detector),
  GuidanceOnly,
  Unknown,
}

/// Jitter products carry the instrument configuration (`ACS/WFC`) instead
/// of a direct detector keyword; `S/C` marks a guidance-sensor-only
/// exposure.
fn jitter_detector(primary: &Header) -> JitterConfig {
  let Some(config) = primary.str_value("CONFIG") else {
    return JitterConfig::Unknown;
  };
  let config = config.trim();
  if config == "S/C" {
    return JitterConfig::GuidanceOnly;
  }
  match config.rsplit('/').next().map(Detector::parse) {
    Some(Ok(d)) => JitterConfig::Detector(d),
    _ => JitterConfig::Unknown,
  }
}
