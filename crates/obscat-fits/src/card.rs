//! Parsing of single 80-byte FITS header cards.

use obscat_core::HeaderValue;

/// The width of one header card in bytes.
pub const CARD_LEN: usize = 80;

/// One parsed keyword card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
  /// Normalized keyword: trimmed, upper-cased, hyphens replaced with
  /// underscores.
  pub keyword: String,
  /// `None` for an undefined (blank) value field.
  pub value:   Option<HeaderValue>,
  pub comment: Option<String>,
}

/// Outcome of parsing one raw card.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedCard {
  /// The `END` card terminating a header.
  End,
  /// COMMENT/HISTORY/blank-keyword cards, and anything without the `= `
  /// value indicator. Carries no keyword value.
  Commentary,
  Keyword(Card),
}

/// Normalize a raw keyword the way the destination schema requires:
/// trim, upper-case, hyphen to underscore. Hyphenated keywords such as
/// `DATE-OBS` are not valid identifiers in the relational schema, so this
/// is mandatory, not cosmetic.
pub fn normalize_keyword(raw: &str) -> String {
  raw.trim().to_ascii_uppercase().replace('-', "_")
}

pub(crate) fn parse_card(raw: &[u8]) -> ParsedCard {
  debug_assert_eq!(raw.len(), CARD_LEN);
  // Cards are ASCII by definition; stray high bytes become blanks so the
  // fixed byte offsets below stay valid.
  let text: String = raw
    .iter()
    .map(|&b| if b.is_ascii() { b as char } else { ' ' })
    .collect();

  let keyword = normalize_keyword(&text[..8]);
  if keyword == "END" && text[8..].trim().is_empty() {
    return ParsedCard::End;
  }
  if keyword.is_empty()
    || keyword == "COMMENT"
    || keyword == "HISTORY"
    || keyword == "CONTINUE"
    || &text[8..10] != "= "
  {
    return ParsedCard::Commentary;
  }

  let (value, comment) = parse_value_field(&text[10..]);
  ParsedCard::Keyword(Card { keyword, value, comment })
}

/// Parse the value field (everything after `= `), returning the typed value
/// and the trailing comment if any.
fn parse_value_field(field: &str) -> (Option<HeaderValue>, Option<String>) {
  let trimmed = field.trim_start();

  if let Some(rest) = trimmed.strip_prefix('\'') {
    return parse_string_value(rest);
  }

  // Unquoted: value runs up to the comment separator.
  let (token, comment) = match trimmed.split_once('/') {
    Some((v, c)) => (v.trim(), non_empty(c.trim())),
    None => (trimmed.trim(), None),
  };

  if token.is_empty() {
    return (None, comment);
  }
  let value = match token {
    "T" => HeaderValue::Logical(true),
    "F" => HeaderValue::Logical(false),
    _ => {
      if let Ok(i) = token.parse::<i64>() {
        HeaderValue::Int(i)
      } else if let Ok(x) = parse_real(token) {
        HeaderValue::Float(x)
      } else {
        // Complex values and free-form tokens are carried as text.
        HeaderValue::Text(token.to_string())
      }
    }
  };
  (Some(value), comment)
}

/// FITS strings are quoted with `'` and escape an embedded quote as `''`;
/// trailing blanks inside the quotes are padding and are stripped.
fn parse_string_value(rest: &str) -> (Option<HeaderValue>, Option<String>) {
  let mut out = String::new();
  let mut chars = rest.chars().peekable();
  while let Some(c) = chars.next() {
    if c == '\'' {
      if chars.peek() == Some(&'\'') {
        chars.next();
        out.push('\'');
      } else {
        break;
      }
    } else {
      out.push(c);
    }
  }
  let comment = chars
    .collect::<String>()
    .trim()
    .strip_prefix('/')
    .map(|c| c.trim().to_string())
    .filter(|c| !c.is_empty());
  (Some(HeaderValue::Text(out.trim_end().to_string())), comment)
}

/// Fortran-style exponents (`1.0D3`) appear in older headers.
fn parse_real(token: &str) -> Result<f64, std::num::ParseFloatError> {
  token.replace(['D', 'd'], "E").parse::<f64>()
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_string())
}
