//! Serde-deserializable types matching Jira REST responses.

use serde::Deserialize;

use super::types::CachedEntry;

#[derive(Debug, Deserialize, Default)]
pub struct ApiParentFields {
  #[serde(default)]
  pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiParentIssue {
  pub key: String,
  #[serde(default)]
  pub fields: ApiParentFields,
}

#[derive(Debug, Deserialize, Default)]
pub struct ApiIssueFields {
  pub parent: Option<ApiParentIssue>,
}

/// Response of `rest/api/2/issue/{key}`, reduced to what parent resolution needs
#[derive(Debug, Deserialize)]
pub struct ApiIssue {
  #[serde(default)]
  pub fields: ApiIssueFields,
}

impl ApiIssue {
  /// The parent issue as a cache record, if this issue is a sub-task
  pub fn into_parent(self) -> Option<CachedEntry> {
    self.fields.parent.map(|parent| CachedEntry {
      id: parent.key,
      title: parent.fields.summary,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_subtask_has_parent() {
    let json = r#"{
      "key": "PROJ-7",
      "fields": {
        "summary": "Write tests",
        "parent": { "key": "PROJ-3", "fields": { "summary": "Ship the feature" } }
      }
    }"#;
    let issue: ApiIssue = serde_json::from_str(json).unwrap();

    assert_eq!(
      issue.into_parent(),
      Some(CachedEntry {
        id: "PROJ-3".to_string(),
        title: "Ship the feature".to_string(),
      })
    );
  }

  #[test]
  fn test_top_level_issue_has_no_parent() {
    let json = r#"{ "key": "PROJ-3", "fields": { "summary": "Ship the feature" } }"#;
    let issue: ApiIssue = serde_json::from_str(json).unwrap();
    assert_eq!(issue.into_parent(), None);
  }
}
