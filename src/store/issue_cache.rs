use color_eyre::Result;

use super::storage::SettingsStore;
use crate::jira::types::CachedEntry;

const ISSUES_PREFIX: &str = "issues";

/// Resolved parent issues keyed by activity id. Entries are never refreshed
/// or evicted once written.
pub struct IssueCache<'a, S: SettingsStore> {
  store: &'a S,
}

impl<'a, S: SettingsStore> IssueCache<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub fn get(&self, issue_id: &str) -> Result<Option<CachedEntry>> {
    self.store.value(&cache_key(issue_id))
  }

  pub fn set(&self, issue_id: &str, entry: &CachedEntry) -> Result<()> {
    self.store.set_value(&cache_key(issue_id), entry)
  }
}

fn cache_key(issue_id: &str) -> String {
  format!("{}.{}", ISSUES_PREFIX, issue_id)
}
