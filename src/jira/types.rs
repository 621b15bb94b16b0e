use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Connection settings for a single invocation
#[derive(Clone)]
pub struct JiraSettings {
  /// Host without scheme, e.g. "jira.example.com"
  pub hostname: String,
  pub username: String,
  pub password: String,
}

impl fmt::Debug for JiraSettings {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("JiraSettings")
      .field("hostname", &self.hostname)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// One item of the user's activity stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
  /// Issue key, e.g. "PROJ-1"
  pub id: String,
  /// Issue summary
  pub title: String,
  /// `YYYY-MM-DD` taken from the entry's publish timestamp
  pub date: String,
}

impl ActivityEntry {
  /// The entry as a cache record, used when its issue has no parent
  pub fn to_cached(&self) -> CachedEntry {
    CachedEntry {
      id: self.id.clone(),
      title: self.title.clone(),
    }
  }
}

/// Resolved parent issue, as stored in the issue cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
  pub id: String,
  pub title: String,
}

/// Issues worked on, keyed by date and then by issue key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedActivities {
  days: BTreeMap<String, BTreeMap<String, String>>,
}

impl GroupedActivities {
  /// Record `entry` under `date`. The first title seen for a key on a given
  /// date is kept.
  pub fn add(&mut self, entry: &CachedEntry, date: &str) {
    self
      .days
      .entry(date.to_string())
      .or_default()
      .entry(entry.id.clone())
      .or_insert_with(|| entry.title.clone());
  }

  /// Days in ascending order with their issues
  pub fn days(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
    self.days.iter().map(|(date, issues)| (date.as_str(), issues))
  }

  #[cfg(test)]
  pub fn get(&self, date: &str) -> Option<&BTreeMap<String, String>> {
    self.days.get(date)
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }

  pub fn len(&self) -> usize {
    self.days.len()
  }
}
