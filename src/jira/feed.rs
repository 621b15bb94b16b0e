//! Parsing of the Atom activity stream returned by `/activity`.

use chrono::NaiveDate;
use color_eyre::{eyre::eyre, Result};
use roxmltree::{Document, Node};

use super::types::ActivityEntry;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const ACTIVITY_NS: &str = "http://activitystrea.ms/spec/1.0/";

/// Why a feed entry did not produce an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  MissingPublished,
  InvalidPublished,
  MissingObject,
  MissingTitle,
  MissingSummary,
}

impl std::fmt::Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SkipReason::MissingPublished => write!(f, "missing published"),
      SkipReason::InvalidPublished => write!(f, "published is not an ISO-8601 timestamp"),
      SkipReason::MissingObject => write!(f, "missing activity:object"),
      SkipReason::MissingTitle => write!(f, "missing activity:object/title"),
      SkipReason::MissingSummary => write!(f, "missing activity:object/summary"),
    }
  }
}

/// Outcome of parsing a single `<entry>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEntry {
  Activity(ActivityEntry),
  Skipped(SkipReason),
}

/// Parse the feed into one outcome per `<entry>`, in feed order.
///
/// Fails only when the payload is not XML or is not an Atom feed; entries that
/// don't have the expected shape are reported as [`ParsedEntry::Skipped`].
pub fn parse_feed(xml: &str) -> Result<Vec<ParsedEntry>> {
  let doc = Document::parse(xml).map_err(|e| eyre!("Failed to parse activity feed: {}", e))?;

  let root = doc.root_element();
  if !is_atom(root, "feed") {
    return Err(eyre!(
      "Unexpected activity feed root element <{}>",
      root.tag_name().name()
    ));
  }

  Ok(
    root
      .children()
      .filter(|node| is_atom(*node, "entry"))
      .map(parse_entry)
      .collect(),
  )
}

fn parse_entry(entry: Node) -> ParsedEntry {
  let Some(published) = child_text(entry, ATOM_NS, "published") else {
    return ParsedEntry::Skipped(SkipReason::MissingPublished);
  };

  let Some(date) = published_date(published) else {
    return ParsedEntry::Skipped(SkipReason::InvalidPublished);
  };

  let Some(object) = child(entry, ACTIVITY_NS, "object") else {
    return ParsedEntry::Skipped(SkipReason::MissingObject);
  };

  let Some(title) = child_text(object, ATOM_NS, "title") else {
    return ParsedEntry::Skipped(SkipReason::MissingTitle);
  };

  let Some(summary) = child_text(object, ATOM_NS, "summary") else {
    return ParsedEntry::Skipped(SkipReason::MissingSummary);
  };

  ParsedEntry::Activity(ActivityEntry {
    id: title.to_string(),
    title: summary.to_string(),
    date,
  })
}

/// `YYYY-MM-DD` part of a `YYYY-MM-DDThh:mm:ss...` timestamp
fn published_date(published: &str) -> Option<String> {
  let (date, _time) = published.split_once('T')?;
  NaiveDate::parse_from_str(date, "%Y-%m-%d")
    .ok()
    .map(|d| d.format("%Y-%m-%d").to_string())
}

fn is_atom(node: Node, name: &str) -> bool {
  node.is_element()
    && node.tag_name().name() == name
    && node.tag_name().namespace().map_or(true, |ns| ns == ATOM_NS)
}

fn child<'a, 'input>(node: Node<'a, 'input>, ns: &str, name: &str) -> Option<Node<'a, 'input>> {
  node.children().find(|c| {
    c.is_element()
      && c.tag_name().name() == name
      && c.tag_name().namespace().map_or(ns == ATOM_NS, |n| n == ns)
  })
}

/// Trimmed text of the named child, `None` when absent or blank
fn child_text<'a>(node: Node<'a, '_>, ns: &str, name: &str) -> Option<&'a str> {
  child(node, ns, name)
    .and_then(|c| c.text())
    .map(str::trim)
    .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn feed(entries: &str) -> String {
    format!(
      r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:activity="http://activitystrea.ms/spec/1.0/">
  <title type="text">Activity Stream</title>
  {}
</feed>"#,
      entries
    )
  }

  fn entry(published: Option<&str>, title: Option<&str>, summary: Option<&str>) -> String {
    let published = published
      .map(|p| format!("<published>{}</published>", p))
      .unwrap_or_default();
    let title = title
      .map(|t| format!(r#"<title type="text">{}</title>"#, t))
      .unwrap_or_default();
    let summary = summary
      .map(|s| format!(r#"<summary type="text">{}</summary>"#, s))
      .unwrap_or_default();
    format!(
      r#"<entry>
    <id>urn:uuid:1</id>
    <title type="html">someone updated an issue</title>
    {published}
    <activity:object>
      <id>https://h/browse/x</id>
      {title}
      {summary}
      <activity:object-type>http://streams.atlassian.com/syndication/types/issue</activity:object-type>
    </activity:object>
  </entry>"#
    )
  }

  #[test]
  fn test_well_formed_entry() {
    let xml = feed(&entry(
      Some("2021-01-01T10:00:00.000Z"),
      Some("PROJ-1"),
      Some("Did X"),
    ));
    let parsed = parse_feed(&xml).unwrap();

    assert_eq!(
      parsed,
      vec![ParsedEntry::Activity(ActivityEntry {
        id: "PROJ-1".to_string(),
        title: "Did X".to_string(),
        date: "2021-01-01".to_string(),
      })]
    );
  }

  #[test]
  fn test_malformed_entries_are_skipped() {
    let entries = [
      entry(Some("2021-01-01T10:00:00Z"), Some("PROJ-1"), Some("Did X")),
      entry(None, Some("PROJ-2"), Some("no date")),
      entry(Some("2021-01-02T10:00:00Z"), None, Some("no key")),
      entry(Some("2021-01-03T10:00:00Z"), Some("PROJ-3"), None),
      entry(Some("2021-01-04T10:00:00Z"), Some("PROJ-4"), Some("  ")),
      r#"<entry><published>2021-01-05T10:00:00Z</published></entry>"#.to_string(),
      entry(Some("yesterday"), Some("PROJ-7"), Some("Did Z")),
      entry(Some("2021-01-01 10:00:00"), Some("PROJ-8"), Some("Did Z")),
      entry(Some("2021-02-30T10:00:00Z"), Some("PROJ-9"), Some("Did Z")),
      entry(Some("2021-01-06T09:00:00Z"), Some("PROJ-6"), Some("Did Y")),
    ];
    let parsed = parse_feed(&feed(&entries.join("\n"))).unwrap();

    let reasons: Vec<_> = parsed
      .iter()
      .filter_map(|p| match p {
        ParsedEntry::Skipped(reason) => Some(*reason),
        ParsedEntry::Activity(_) => None,
      })
      .collect();
    assert_eq!(
      reasons,
      vec![
        SkipReason::MissingPublished,
        SkipReason::MissingTitle,
        SkipReason::MissingSummary,
        SkipReason::MissingSummary,
        SkipReason::MissingObject,
        SkipReason::InvalidPublished,
        SkipReason::InvalidPublished,
        SkipReason::InvalidPublished,
      ]
    );

    let ids: Vec<String> = parsed
      .into_iter()
      .filter_map(|p| match p {
        ParsedEntry::Activity(activity) => Some(activity.id),
        ParsedEntry::Skipped(_) => None,
      })
      .collect();
    assert_eq!(ids, vec!["PROJ-1", "PROJ-6"]);
  }

  #[test]
  fn test_feed_without_entries() {
    assert!(parse_feed(&feed("")).unwrap().is_empty());
  }

  #[test]
  fn test_rejects_non_xml() {
    assert!(parse_feed("<html><body>Login").is_err());
  }

  #[test]
  fn test_rejects_foreign_root() {
    assert!(parse_feed("<html><body>Login</body></html>").is_err());
  }

  #[test]
  fn test_published_date() {
    assert_eq!(
      published_date("2021-01-01T10:00:00.000+0100").as_deref(),
      Some("2021-01-01")
    );
    assert_eq!(published_date("2021-01-01"), None);
    assert_eq!(published_date("20210101T100000Z"), None);
  }

  #[test]
  fn test_skip_reason_display() {
    assert_eq!(
      SkipReason::MissingSummary.to_string(),
      "missing activity:object/summary"
    );
  }
}
