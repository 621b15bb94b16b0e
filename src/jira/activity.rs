//! The activity pipeline: fetch the feed, parse it, resolve parents, group by day.

use color_eyre::{Report, Result};
use futures::{stream, TryStreamExt};
use tracing::{debug, info};

use super::client::ActivitySource;
use super::feed::{parse_feed, ParsedEntry};
use super::resolver::ParentResolver;
use super::types::{ActivityEntry, GroupedActivities};
use crate::store::SettingsStore;

/// Load the user's activity and group the parent issues by day.
///
/// Parents are resolved one at a time in feed order; the first failing
/// lookup aborts the whole run.
pub async fn get_activities<A, S>(
  source: &A,
  store: &S,
  max_results: u32,
  from_date_millis: Option<i64>,
) -> Result<GroupedActivities>
where
  A: ActivitySource,
  S: SettingsStore,
{
  let xml = source
    .fetch_activity_feed(max_results, from_date_millis)
    .await?;

  let activities = activity_entries(&xml)?;
  info!("Resolving parent issues for {} activities", activities.len());

  let resolver = ParentResolver::new(source, store);
  let resolver = &resolver;

  stream::iter(activities.into_iter().map(Ok::<_, Report>))
    .try_fold(
      GroupedActivities::default(),
      |mut result, activity| async move {
        let parent = resolver.resolve(&activity).await?;
        result.add(&parent, &activity.date);
        Ok::<_, Report>(result)
      },
    )
    .await
}

/// Well-formed activities of the feed, in feed order.
fn activity_entries(xml: &str) -> Result<Vec<ActivityEntry>> {
  let parsed = parse_feed(xml)?;
  let total = parsed.len();

  let activities: Vec<ActivityEntry> = parsed
    .into_iter()
    .filter_map(|entry| match entry {
      ParsedEntry::Activity(activity) => Some(activity),
      ParsedEntry::Skipped(reason) => {
        debug!("Skipping feed entry: {}", reason);
        None
      }
    })
    .collect();

  info!("Feed contained {} entries, {} usable", total, activities.len());
  Ok(activities)
}
