use color_eyre::Result;

use super::storage::SettingsStore;

const HOSTNAME_KEY: &str = "settings.hostname";
const USERNAME_KEY: &str = "settings.username";

/// Which persisted default a command operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSetting {
  Hostname,
  Username,
}

impl DefaultSetting {
  fn key(self) -> &'static str {
    match self {
      DefaultSetting::Hostname => HOSTNAME_KEY,
      DefaultSetting::Username => USERNAME_KEY,
    }
  }
}

/// Hostname and username remembered between invocations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
  pub hostname: Option<String>,
  pub username: Option<String>,
}

impl Defaults {
  pub fn load<S: SettingsStore>(store: &S) -> Result<Self> {
    Ok(Self {
      hostname: Self::get(store, DefaultSetting::Hostname)?,
      username: Self::get(store, DefaultSetting::Username)?,
    })
  }

  pub fn get<S: SettingsStore>(store: &S, setting: DefaultSetting) -> Result<Option<String>> {
    let value: Option<String> = store.value(setting.key())?;
    Ok(value.filter(|v| !v.trim().is_empty()))
  }

  pub fn set<S: SettingsStore>(store: &S, setting: DefaultSetting, value: &str) -> Result<()> {
    store.set_value(setting.key(), &value.trim())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::SqliteStore;

  #[test]
  fn test_unset_defaults() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(Defaults::load(&store).unwrap(), Defaults::default());
  }

  #[test]
  fn test_set_and_load() {
    let store = SqliteStore::open_in_memory().unwrap();
    Defaults::set(&store, DefaultSetting::Hostname, " jira.example.com ").unwrap();
    Defaults::set(&store, DefaultSetting::Username, "jane").unwrap();

    let defaults = Defaults::load(&store).unwrap();
    assert_eq!(defaults.hostname.as_deref(), Some("jira.example.com"));
    assert_eq!(defaults.username.as_deref(), Some("jane"));
  }

  #[test]
  fn test_blank_value_reads_as_unset() {
    let store = SqliteStore::open_in_memory().unwrap();
    Defaults::set(&store, DefaultSetting::Username, "").unwrap();
    assert_eq!(
      Defaults::get(&store, DefaultSetting::Username).unwrap(),
      None
    );
  }
}
