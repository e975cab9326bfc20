//! Header-only FITS reader for the obscat ingester.
//!
//! Reads the key/value headers of every HDU in a multi-extension FITS file,
//! skipping over data blocks without loading them. Pixel data is never
//! touched; preview rendering is a separate concern.

pub mod card;
pub mod error;
pub mod parse;

pub use card::{normalize_keyword, Card};
pub use error::{Error, Result};
pub use parse::{Fits, Header};
