//! Command handlers behind the CLI subcommands

use color_eyre::{eyre::eyre, Result};
use dialoguer::{Input, Password};
use std::io::{self, Write};
use tracing::info;

use crate::config::Config;
use crate::filter::Filter;
use crate::jira::activity::get_activities;
use crate::jira::client::JiraClient;
use crate::jira::types::JiraSettings;
use crate::print::print;
use crate::spinner::Spinner;
use crate::store::{DefaultSetting, Defaults, SettingsStore};

/// Overrides given on the `list` command line
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
  pub hostname: Option<String>,
  pub username: Option<String>,
  pub max_results: Option<u32>,
  pub filter: Option<String>,
  pub verbose: bool,
}

/// Hostname and username after applying flags, stored defaults and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub hostname: String,
  pub username: String,
}

fn non_empty(value: Option<&String>) -> Option<String> {
  value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from)
}

/// Pick hostname and username: flag first, then stored default, then config.
pub fn resolve_target(options: &ListOptions, defaults: &Defaults, config: &Config) -> Option<Target> {
  let hostname = non_empty(options.hostname.as_ref())
    .or_else(|| non_empty(defaults.hostname.as_ref()))
    .or_else(|| non_empty(config.hostname.as_ref()))?;
  let username = non_empty(options.username.as_ref())
    .or_else(|| non_empty(defaults.username.as_ref()))
    .or_else(|| non_empty(config.username.as_ref()))?;

  Some(Target { hostname, username })
}

/// `list`: load the activity stream and print the parent issues per day
pub async fn list<S: SettingsStore>(options: ListOptions, config: &Config, store: &S) -> Result<()> {
  // Reject bad filters before prompting or touching the network
  let filter = options
    .filter
    .as_deref()
    .map(str::parse::<Filter>)
    .transpose()?;

  let defaults = Defaults::load(store)?;
  let Some(target) = resolve_target(&options, &defaults, config) else {
    println!("Please specify your username and hostname either per command options or defaults.");
    println!("jira-activity --help");
    return write_defaults(&mut io::stdout(), &defaults);
  };

  let password = match Config::get_password() {
    Some(password) => password,
    None => Password::new()
      .with_prompt("Enter your password")
      .interact()
      .map_err(|e| eyre!("Failed to read password: {}", e))?,
  };

  let settings = JiraSettings {
    hostname: target.hostname,
    username: target.username,
    password,
  };
  let max_results = options.max_results.unwrap_or(config.max_results);
  let from_date_millis = filter.map(Filter::from_date_millis).transpose()?;

  info!(
    "Listing activity of {} on {} (max {}, from {:?})",
    settings.username, settings.hostname, max_results, from_date_millis
  );

  let client = JiraClient::new(settings)?;

  let mut spinner = Spinner::start("accessing jira..", !options.verbose);
  let activities = get_activities(&client, store, max_results, from_date_millis).await;
  spinner.stop();

  let activities = activities?;
  if activities.is_empty() {
    info!("No activity found");
  } else {
    info!("Found activity on {} days", activities.len());
  }

  let mut out = io::stdout().lock();
  print(&mut out, &activities).map_err(|e| eyre!("Failed to print activities: {}", e))?;
  out.flush().map_err(|e| eyre!("Failed to print activities: {}", e))
}

/// `hostname` / `username`: persist a default, prompting when no value is given
pub fn set_default<S: SettingsStore>(
  store: &S,
  setting: DefaultSetting,
  value: Option<String>,
) -> Result<()> {
  let value = match non_empty(value.as_ref()) {
    Some(value) => value,
    None => prompt_default(store, setting)?,
  };

  Defaults::set(store, setting, &value)?;
  info!("Saved default {:?}: {}", setting, value);
  Ok(())
}

fn prompt_default<S: SettingsStore>(store: &S, setting: DefaultSetting) -> Result<String> {
  let message = match setting {
    DefaultSetting::Hostname => "Enter your default JIRA hostname (e.g. jira.example.com)",
    DefaultSetting::Username => "Enter your default JIRA username (e.g. jane.doe@example.com)",
  };

  let mut input = Input::<String>::new().with_prompt(message);
  if let Some(current) = Defaults::get(store, setting)? {
    input = input.default(current);
  }

  input
    .interact_text()
    .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// `defaults`: print the stored hostname and username
pub fn show_defaults<S: SettingsStore>(store: &S) -> Result<()> {
  let defaults = Defaults::load(store)?;
  write_defaults(&mut io::stdout(), &defaults)
}

fn write_defaults<W: Write>(out: &mut W, defaults: &Defaults) -> Result<()> {
  render_defaults(out, defaults).map_err(|e| eyre!("Failed to print defaults: {}", e))
}

fn render_defaults<W: Write>(out: &mut W, defaults: &Defaults) -> io::Result<()> {
  let not_set = "not set";
  writeln!(out, "These are your current default settings:")?;
  writeln!(
    out,
    "* username: {}",
    defaults.username.as_deref().unwrap_or(not_set)
  )?;
  writeln!(
    out,
    "* hostname: {}",
    defaults.hostname.as_deref().unwrap_or(not_set)
  )
}
