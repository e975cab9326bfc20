//! Grouping of indexed drizzle keywords into per-index parameter rows.
//!
//! Drizzled products describe each input image with a keyword family like
//! `D001COEF`, `D001DATA`, `D002COEF`, ... These never belong to the header
//! tables; the accumulator consumes them during header walking and hands
//! back one parameter group per index.

use std::{collections::BTreeMap, sync::LazyLock};

use obscat_core::{drizzle_field_type, HeaderValue};
use regex::Regex;
use tracing::warn;

static DRIZZLE_KEY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^D(\d{3})([A-Z]+)$").unwrap());

#[derive(Debug, Default)]
pub struct DrizzleAccumulator {
  groups: BTreeMap<u32, Vec<(String, HeaderValue)>>,
}

impl DrizzleAccumulator {
  /// Consume `keyword` if it belongs to the drizzle family; returns whether
  /// it was consumed. A consumed keyword with an unrecognized field suffix
  /// is dropped with a warning rather than leaked into a header row.
  pub fn note(&mut self, keyword: &str, value: &HeaderValue) -> bool {
    let Some(caps) = DRIZZLE_KEY.captures(keyword) else {
      return false;
    };
    let index: u32 = caps[1].parse().unwrap_or(0);
    let field = caps[2].to_ascii_lowercase();
    if drizzle_field_type(&field).is_none() {
      warn!(keyword, "unrecognized drizzle parameter field");
      return true;
    }
    self
      .groups
      .entry(index)
      .or_default()
      .push((field, value.clone()));
    true
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  /// Per-index parameter groups, in index order.
  pub fn into_groups(
    self,
  ) -> impl Iterator<Item = (u32, Vec<(String, HeaderValue)>)> {
    self.groups.into_iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn groups_by_index_and_lowercases_fields() {
    let mut acc = DrizzleAccumulator::default();
    assert!(acc.note("D001DATA", &HeaderValue::Text("a_flt.fits".into())));
    assert!(acc.note("D001SCAL", &HeaderValue::Float(0.05)));
    assert!(acc.note("D002DATA", &HeaderValue::Text("b_flt.fits".into())));
    assert!(!acc.note("EXPTIME", &HeaderValue::Float(100.0)));

    let groups: Vec<_> = acc.into_groups().collect();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, 1);
    assert_eq!(
      groups[0].1,
      vec![
        ("data".to_string(), HeaderValue::Text("a_flt.fits".into())),
        ("scal".to_string(), HeaderValue::Float(0.05)),
      ]
    );
    assert_eq!(groups[1].0, 2);
  }

  #[test]
  fn unknown_field_suffix_is_consumed_but_dropped() {
    let mut acc = DrizzleAccumulator::default();
    assert!(acc.note("D001XYZQ", &HeaderValue::Int(1)));
    assert!(acc.is_empty());
  }

  #[test]
  fn non_family_keywords_pass_through() {
    let mut acc = DrizzleAccumulator::default();
    assert!(!acc.note("DETECTOR", &HeaderValue::Text("WFC".into())));
    assert!(!acc.note("D12DATA", &HeaderValue::Int(1)));
    assert!(acc.is_empty());
  }
}
