use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::SqliteStore;

const DEFAULT_MAX_RESULTS: u32 = 500;

fn default_max_results() -> u32 {
  DEFAULT_MAX_RESULTS
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
  /// Fallback hostname when neither a flag nor a stored default is set
  pub hostname: Option<String>,
  /// Fallback username when neither a flag nor a stored default is set
  pub username: Option<String>,
  /// Size of the activity stream request
  #[serde(default = "default_max_results")]
  pub max_results: u32,
  /// Location of the settings/cache database
  pub store_path: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      hostname: None,
      username: None,
      max_results: DEFAULT_MAX_RESULTS,
      store_path: None,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided (must exist)
  /// 2. ./jira-activity.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/jira-activity/config.yaml
  ///
  /// Without any config file the built-in defaults apply.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("jira-activity.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("jira-activity").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file deserializes to null
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))
  }

  /// Path of the settings store, falling back to the data directory.
  pub fn store_path(&self) -> Result<PathBuf> {
    match &self.store_path {
      Some(path) => Ok(path.clone()),
      None => SqliteStore::default_path(),
    }
  }

  /// Get the Jira password from the environment, if provided there.
  ///
  /// Checks JIRA_ACTIVITY_PASSWORD.
  pub fn get_password() -> Option<String> {
    std::env::var("JIRA_ACTIVITY_PASSWORD")
      .ok()
      .filter(|p| !p.is_empty())
  }
}
