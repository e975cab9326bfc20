//! Scanning multi-extension FITS files: header blocks in, data blocks
//! skipped by computed size.

use std::{
  fs::File,
  io::{BufReader, Read, Seek, SeekFrom},
  path::Path,
};

use obscat_core::HeaderValue;

use crate::{
  card::{parse_card, Card, ParsedCard, CARD_LEN},
  Error, Result,
};

/// FITS records are fixed 2880-byte blocks (36 cards).
const BLOCK_LEN: usize = 2880;

// ─── Header ──────────────────────────────────────────────────────────────────

/// The parsed header of one HDU.
#[derive(Debug, Clone, Default)]
pub struct Header {
  cards: Vec<Card>,
}

impl Header {
  /// Look up a value by keyword; `key` is normalized before comparison.
  pub fn value(&self, key: &str) -> Option<&HeaderValue> {
    let key = crate::card::normalize_keyword(key);
    self
      .cards
      .iter()
      .find(|c| c.keyword == key)
      .and_then(|c| c.value.as_ref())
  }

  pub fn str_value(&self, key: &str) -> Option<&str> {
    self.value(key).and_then(HeaderValue::as_str)
  }

  pub fn int_value(&self, key: &str) -> Option<i64> {
    self.value(key).and_then(HeaderValue::as_int)
  }

  /// The `EXTNAME` tag, if present.
  pub fn extname(&self) -> Option<&str> {
    self.str_value("EXTNAME")
  }

  /// The semantically meaningful keyword/value pairs: structural cards,
  /// identity keys, undefined values, and empty strings are dropped.
  pub fn keywords(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
    self.cards.iter().filter_map(|c| {
      if is_structural(&c.keyword) || is_identity(&c.keyword) {
        return None;
      }
      let value = c.value.as_ref()?;
      if value.is_empty() {
        return None;
      }
      Some((c.keyword.as_str(), value))
    })
  }

  /// Byte length of the data unit following this header, rounded up to
  /// whole blocks.
  fn data_len(&self, primary: bool) -> u64 {
    let bitpix = self.int_value("BITPIX").unwrap_or(0).unsigned_abs();
    let naxis = self.int_value("NAXIS").unwrap_or(0);
    if naxis <= 0 || bitpix == 0 {
      return 0;
    }
    let mut pixels: u64 = 1;
    for axis in 1..=naxis {
      pixels =
        pixels.saturating_mul(self.int_value(&format!("NAXIS{axis}")).unwrap_or(0).max(0) as u64);
    }
    let (pcount, gcount) = if primary {
      (0, 1)
    } else {
      (
        self.int_value("PCOUNT").unwrap_or(0).max(0) as u64,
        self.int_value("GCOUNT").unwrap_or(1).max(1) as u64,
      )
    };
    let bytes = (bitpix / 8).saturating_mul(gcount).saturating_mul(pcount + pixels);
    bytes.div_ceil(BLOCK_LEN as u64) * BLOCK_LEN as u64
  }
}

/// Keys that describe file structure rather than observation metadata.
fn is_structural(key: &str) -> bool {
  matches!(key, "SIMPLE" | "BITPIX" | "EXTEND" | "XTENSION" | "PCOUNT" | "GCOUNT")
    || (key.starts_with("NAXIS")
      && key["NAXIS".len()..].bytes().all(|b| b.is_ascii_digit()))
}

/// Keys already encoded in the table identity or its key columns.
fn is_identity(key: &str) -> bool {
  matches!(key, "ROOTNAME" | "FILENAME")
}

// ─── Fits ────────────────────────────────────────────────────────────────────

/// All HDU headers of one FITS file, in file order.
#[derive(Debug, Clone)]
pub struct Fits {
  hdus: Vec<Header>,
}

impl Fits {
  /// Scan every header in the file at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  /// Scan every header from an arbitrary seekable source.
  pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
    let mut hdus = Vec::new();

    loop {
      let header = match read_header(&mut reader, hdus.len())? {
        Some(h) => h,
        None => break, // clean EOF between HDUs
      };
      if hdus.is_empty() && header.value("SIMPLE").is_none() {
        return Err(Error::NotFits);
      }
      let skip = header.data_len(hdus.is_empty());
      hdus.push(header);
      if skip > 0 {
        reader.seek(SeekFrom::Current(skip as i64))?;
      }
    }

    if hdus.is_empty() {
      return Err(Error::NotFits);
    }
    Ok(Self { hdus })
  }

  /// Number of HDUs (primary included).
  pub fn len(&self) -> usize {
    self.hdus.len()
  }

  pub fn is_empty(&self) -> bool {
    self.hdus.is_empty()
  }

  /// The header of extension `ext` (0 = primary).
  pub fn header(&self, ext: usize) -> Result<&Header> {
    self.hdus.get(ext).ok_or(Error::ExtensionNotPresent {
      ext,
      available: self.hdus.len(),
    })
  }

  pub fn primary(&self) -> &Header {
    &self.hdus[0]
  }
}

/// Read header blocks until an `END` card. `Ok(None)` means clean EOF before
/// any block of this HDU was read.
fn read_header<R: Read>(reader: &mut R, hdu: usize) -> Result<Option<Header>> {
  let mut cards = Vec::new();
  let mut block = [0u8; BLOCK_LEN];
  let mut any_block = false;

  loop {
    match read_block(reader, &mut block)? {
      false if any_block => return Err(Error::Truncated { hdu }),
      false => return Ok(None),
      true => any_block = true,
    }

    for chunk in block.chunks_exact(CARD_LEN) {
      match parse_card(chunk) {
        ParsedCard::End => return Ok(Some(Header { cards })),
        ParsedCard::Commentary => {}
        ParsedCard::Keyword(card) => cards.push(card),
      }
    }
  }
}

/// Fill `block`; `Ok(false)` on EOF at a block boundary.
fn read_block<R: Read>(reader: &mut R, block: &mut [u8]) -> Result<bool> {
  let mut filled = 0;
  while filled < block.len() {
    let n = reader.read(&mut block[filled..])?;
    if n == 0 {
      if filled == 0 {
        return Ok(false);
      }
      // Tolerate a final short block; pad with blanks.
      block[filled..].fill(b' ');
      return Ok(true);
    }
    filled += n;
  }
  Ok(true)
}
