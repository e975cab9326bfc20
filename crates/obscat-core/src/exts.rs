//! The declared header extensions per (detector, filetype), and the
//! extension-name allow-list.

use crate::{Detector, FileKind};

/// Header extension indices declared ingestable for a (detector, filetype)
/// pair. `None` means the detector never produces that filetype.
pub fn extensions_for(
  detector: Detector,
  kind: FileKind,
) -> Option<&'static [u32]> {
  use Detector::*;
  use FileKind::*;

  const FULL: &[u32] = &[0, 1, 2, 3, 4, 5, 6];
  const QUAD: &[u32] = &[0, 1, 2, 3];
  const TRIO: &[u32] = &[0, 1, 2];
  const PAIR: &[u32] = &[0, 1];

  match (detector, kind) {
    // WFC exposures carry two chips, hence two SCI/ERR/DQ triplets.
    (Wfc, Jif | Jit | Flt | Flc | Raw | Crj | Crc) => Some(FULL),
    (Wfc, Drz | Drc) => Some(QUAD),
    (Wfc, Spt | Asn) => Some(PAIR),

    (Hrc, Jif | Jit) => Some(TRIO),
    (Hrc, Flt | Drz | Raw | Crj) => Some(QUAD),
    (Hrc, Spt | Asn) => Some(PAIR),
    (Hrc, Flc | Drc | Crc) => None,

    (Sbc, Jif | Jit) => Some(TRIO),
    (Sbc, Flt | Drz | Raw) => Some(QUAD),
    (Sbc, Spt | Asn) => Some(PAIR),
    (Sbc, Flc | Drc | Crj | Crc) => None,
  }
}

/// Extension name tags whose headers are ingestable. Anything else is
/// silently skipped.
pub const INGESTABLE_EXTNAMES: &[&str] = &[
  "PRIMARY", "SCI", "ERR", "DQ", "UDL", "jit", "jif", "ASN", "WHT", "CTX",
];

pub fn extname_ingestable(extname: &str) -> bool {
  INGESTABLE_EXTNAMES.contains(&extname)
}
