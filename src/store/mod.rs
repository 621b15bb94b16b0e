//! Durable state shared between invocations: the parent-issue cache and the
//! default hostname/username.

mod defaults;
mod issue_cache;
mod storage;

pub use defaults::{DefaultSetting, Defaults};
pub use issue_cache::IssueCache;
pub use storage::{SettingsStore, SqliteStore};
