use crate::jira::api_types::ApiIssue;
use crate::jira::types::JiraSettings;
use color_eyre::{eyre::eyre, Result};
use std::future::Future;
use tracing::debug;
use url::Url;

/// Source of activity data. The pipeline only talks to Jira through this.
pub trait ActivitySource {
  /// Raw Atom XML of the user's activity stream
  fn fetch_activity_feed(
    &self,
    max_results: u32,
    from_date_millis: Option<i64>,
  ) -> impl Future<Output = Result<String>>;

  /// Issue details for a single key
  fn fetch_issue(&self, issue_id: &str) -> impl Future<Output = Result<ApiIssue>>;
}

/// Percent-encode a query value the way browsers' `encodeURIComponent` does,
/// leaving `!'()*` as they are.
fn encode_uri_component(value: &str) -> String {
  urlencoding::encode(value)
    .replace("%21", "!")
    .replace("%27", "'")
    .replace("%28", "(")
    .replace("%29", ")")
    .replace("%2A", "*")
}

/// Build the activity stream URL for `settings.username`.
pub fn activity_feed_url(
  settings: &JiraSettings,
  max_results: u32,
  from_date_millis: Option<i64>,
) -> Result<Url> {
  feed_url_at(
    &base_url(settings)?,
    &settings.username,
    max_results,
    from_date_millis,
  )
}

fn feed_url_at(
  base: &Url,
  username: &str,
  max_results: u32,
  from_date_millis: Option<i64>,
) -> Result<Url> {
  let from_date_filter = from_date_millis
    .map(|millis| format!("&streams=update-date+AFTER+{}", millis))
    .unwrap_or_default();

  let path = format!(
    "activity?maxResults={}&streams=user+IS+{}{}&os_authType=basic",
    max_results,
    encode_uri_component(username),
    from_date_filter
  );

  base
    .join(&path)
    .map_err(|e| eyre!("Invalid activity feed URL: {}", e))
}

/// Build the REST URL for a single issue
pub fn issue_url(settings: &JiraSettings, issue_id: &str) -> Result<Url> {
  issue_url_at(&base_url(settings)?, issue_id)
}

fn issue_url_at(base: &Url, issue_id: &str) -> Result<Url> {
  let path = format!("rest/api/2/issue/{}", encode_uri_component(issue_id));

  base
    .join(&path)
    .map_err(|e| eyre!("Invalid issue URL: {}", e))
}

fn base_url(settings: &JiraSettings) -> Result<Url> {
  Url::parse(&format!("https://{}/", settings.hostname))
    .map_err(|e| eyre!("Invalid hostname '{}': {}", settings.hostname, e))
}

/// Jira HTTP client authenticating with Basic credentials
#[derive(Clone)]
pub struct JiraClient {
  client: reqwest::Client,
  settings: JiraSettings,
  base_url: Url,
}

impl JiraClient {
  pub fn new(settings: JiraSettings) -> Result<Self> {
    let base_url = base_url(&settings)?;
    Self::with_base_url(settings, base_url)
  }

  /// Client talking to `base_url` instead of `https://<hostname>/`.
  fn with_base_url(settings: JiraSettings, base_url: Url) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(concat!("jira-activity/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      client,
      settings,
      base_url,
    })
  }

  async fn get(&self, url: Url, accept: &str) -> Result<reqwest::Response> {
    debug!("GET {}", url);

    let response = self
      .client
      .get(url.clone())
      .header(reqwest::header::ACCEPT, accept)
      .basic_auth(&self.settings.username, Some(&self.settings.password))
      .send()
      .await
      .map_err(|e| eyre!("Request to {} failed: {}", url, e))?;

    response
      .error_for_status()
      .map_err(|e| eyre!("Request to {} failed: {}", url, e))
  }
}

impl ActivitySource for JiraClient {
  async fn fetch_activity_feed(
    &self,
    max_results: u32,
    from_date_millis: Option<i64>,
  ) -> Result<String> {
    let url = feed_url_at(
      &self.base_url,
      &self.settings.username,
      max_results,
      from_date_millis,
    )?;

    self
      .get(url, "application/atom+xml")
      .await?
      .text()
      .await
      .map_err(|e| eyre!("Failed to read activity feed: {}", e))
  }

  async fn fetch_issue(&self, issue_id: &str) -> Result<ApiIssue> {
    let url = issue_url_at(&self.base_url, issue_id)?;

    let body = self
      .get(url, "application/json")
      .await?
      .text()
      .await
      .map_err(|e| eyre!("Failed to read issue {}: {}", issue_id, e))?;

    serde_json::from_str(&body).map_err(|e| eyre!("Failed to parse issue {}: {}", issue_id, e))
  }
}
