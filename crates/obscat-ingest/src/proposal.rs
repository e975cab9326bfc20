//! Best-effort proposal-type classification against the status web page.

use std::time::Duration;

use obscat_core::ProposalType;
use tracing::warn;

/// Marker immediately preceding the category string in the status HTML.
const TYPE_MARKER: &str = "prop_type\">";

/// Looks up proposal categories over HTTP with a bounded timeout.
///
/// Classification is strictly best-effort: every failure mode (network,
/// HTTP status, scrape miss, out-of-vocabulary category) yields `None` plus
/// a warning and never stalls or aborts ingestion.
pub struct ProposalClassifier {
  client:       reqwest::blocking::Client,
  url_template: String,
}

impl ProposalClassifier {
  /// Build a classifier for `url_template`, where `{}` stands for the
  /// proposal id.
  pub fn new(url_template: &str, timeout: Duration) -> Option<Self> {
    match reqwest::blocking::Client::builder().timeout(timeout).build() {
      Ok(client) => Some(Self {
        client,
        url_template: url_template.to_string(),
      }),
      Err(err) => {
        warn!(%err, "proposal classifier unavailable");
        None
      }
    }
  }

  pub fn classify(&self, proposid: u32) -> Option<ProposalType> {
    let url = self.url_template.replace("{}", &proposid.to_string());
    let body = match self
      .client
      .get(&url)
      .send()
      .and_then(|r| r.error_for_status())
      .and_then(|r| r.text())
    {
      Ok(body) => body,
      Err(err) => {
        warn!(proposid, %err, "proposal status lookup failed");
        return None;
      }
    };

    let parsed = parse_proposal_type(&body);
    if parsed.is_none() {
      warn!(proposid, "no valid proposal type on status page");
    }
    parsed
  }
}

/// Extract and validate the category string from the status page HTML.
pub fn parse_proposal_type(html: &str) -> Option<ProposalType> {
  let rest = html.split(TYPE_MARKER).nth(1)?;
  let raw = rest.split('<').next()?;
  ProposalType::parse(raw).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scrapes_category_from_marker() {
    let html = r#"<html><a class="prop_type">CAL/ACS</a></html>"#;
    assert_eq!(parse_proposal_type(html), Some(ProposalType::CalAcs));
  }

  #[test]
  fn out_of_vocabulary_category_is_rejected() {
    let html = r#"<a class="prop_type">GO/XYZ</a>"#;
    assert_eq!(parse_proposal_type(html), None);
  }

  #[test]
  fn missing_marker_yields_none() {
    assert_eq!(parse_proposal_type("<html>nothing here</html>"), None);
  }
}
