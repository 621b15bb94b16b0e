use color_eyre::Result;
use tracing::debug;

use super::client::ActivitySource;
use super::types::{ActivityEntry, CachedEntry};
use crate::store::{IssueCache, SettingsStore};

/// Maps activity entries to the issue they should be reported under.
pub struct ParentResolver<'a, A: ActivitySource, S: SettingsStore> {
  source: &'a A,
  cache: IssueCache<'a, S>,
}

impl<'a, A: ActivitySource, S: SettingsStore> ParentResolver<'a, A, S> {
  pub fn new(source: &'a A, store: &'a S) -> Self {
    Self {
      source,
      cache: IssueCache::new(store),
    }
  }

  /// Resolve `activity` to its parent issue, or to itself for top-level
  /// issues. The answer is cached permanently under the activity id.
  pub async fn resolve(&self, activity: &ActivityEntry) -> Result<CachedEntry> {
    if let Some(cached) = self.cache.get(&activity.id)? {
      debug!("Cache hit found for issue {}", activity.id);
      return Ok(cached);
    }

    debug!("Searching the parent issue for {} in jira", activity.id);
    let issue = self.source.fetch_issue(&activity.id).await?;

    let resolved = match issue.into_parent() {
      Some(parent) => {
        debug!("Parent issue found for {} > {}", activity.id, parent.id);
        parent
      }
      None => activity.to_cached(),
    };

    self.cache.set(&activity.id, &resolved)?;
    Ok(resolved)
  }
}
