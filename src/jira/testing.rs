//! In-process stand-in for Jira used by the pipeline tests.

use color_eyre::{eyre::eyre, Result};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::api_types::{ApiIssue, ApiIssueFields, ApiParentFields, ApiParentIssue};
use super::client::ActivitySource;

#[derive(Default)]
pub struct FakeSource {
  feed: Option<String>,
  parents: HashMap<String, (String, String)>,
  failing: HashSet<String>,
  feed_requests: RefCell<Vec<(u32, Option<i64>)>>,
  issue_calls: Cell<usize>,
}

impl FakeSource {
  pub fn with_feed(mut self, xml: impl Into<String>) -> Self {
    self.feed = Some(xml.into());
    self
  }

  pub fn with_parent(mut self, issue: &str, parent_key: &str, parent_summary: &str) -> Self {
    self.parents.insert(
      issue.to_string(),
      (parent_key.to_string(), parent_summary.to_string()),
    );
    self
  }

  pub fn failing_issue(mut self, issue: &str) -> Self {
    self.failing.insert(issue.to_string());
    self
  }

  pub fn issue_calls(&self) -> usize {
    self.issue_calls.get()
  }

  pub fn feed_requests(&self) -> Vec<(u32, Option<i64>)> {
    self.feed_requests.borrow().clone()
  }
}

impl ActivitySource for FakeSource {
  async fn fetch_activity_feed(
    &self,
    max_results: u32,
    from_date_millis: Option<i64>,
  ) -> Result<String> {
    self
      .feed_requests
      .borrow_mut()
      .push((max_results, from_date_millis));
    self
      .feed
      .clone()
      .ok_or_else(|| eyre!("Request to activity feed failed: 401 Unauthorized"))
  }

  async fn fetch_issue(&self, issue_id: &str) -> Result<ApiIssue> {
    self.issue_calls.set(self.issue_calls.get() + 1);

    if self.failing.contains(issue_id) {
      return Err(eyre!("Request to issue {} failed: 500", issue_id));
    }

    let parent = self
      .parents
      .get(issue_id)
      .map(|(key, summary)| ApiParentIssue {
        key: key.clone(),
        fields: ApiParentFields {
          summary: summary.clone(),
        },
      });

    Ok(ApiIssue {
      fields: ApiIssueFields { parent },
    })
  }
}

/// Atom feed wrapping the given `(published, key, summary)` entries
pub fn feed_xml(entries: &[(&str, &str, &str)]) -> String {
  let body: String = entries
    .iter()
    .map(|(published, key, summary)| {
      format!(
        r#"<entry>
    <published>{published}</published>
    <activity:object>
      <title type="text">{key}</title>
      <summary type="text">{summary}</summary>
    </activity:object>
  </entry>"#
      )
    })
    .collect();

  format!(
    r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:activity="http://activitystrea.ms/spec/1.0/">
  {}
</feed>"#,
    body
  )
}
