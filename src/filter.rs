use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use color_eyre::{eyre::eyre, Result};
use std::str::FromStr;

/// How far past midnight to look for the first existing local time
const MAX_GAP_STEPS: i64 = 12;
const GAP_STEP_MINUTES: i64 = 15;

/// Restricts the activity stream to the current week or month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
  Week,
  Month,
}

impl FromStr for Filter {
  type Err = color_eyre::Report;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "week" => Ok(Filter::Week),
      "month" => Ok(Filter::Month),
      _ => Err(eyre!(
        "Please use the term \"week\" or \"month\" to filter the output"
      )),
    }
  }
}

impl Filter {
  /// First day of the period containing `today`. Weeks start on Sunday.
  fn first_day(self, today: NaiveDate) -> NaiveDate {
    match self {
      Filter::Week => today - Duration::days(i64::from(today.weekday().num_days_from_sunday())),
      Filter::Month => today.with_day(1).unwrap_or(today),
    }
  }

  /// Midnight at the start of the period containing `now`, in `now`'s zone.
  ///
  /// When a DST change skips midnight, the first local time after the gap is
  /// used instead.
  pub fn start_of<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let midnight = self
      .first_day(now.date_naive())
      .and_hms_opt(0, 0, 0)
      .ok_or_else(|| eyre!("Invalid start of {:?}", self))?;

    let tz = now.timezone();
    (0..=MAX_GAP_STEPS)
      .map(|step| midnight + Duration::minutes(step * GAP_STEP_MINUTES))
      .find_map(|local| tz.from_local_datetime(&local).earliest())
      .ok_or_else(|| eyre!("Start of {:?} does not exist in the local time zone", self))
  }

  /// Epoch milliseconds for the `update-date AFTER` stream filter.
  pub fn from_date_millis_at<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Result<i64> {
    Ok(self.start_of(now)?.timestamp_millis())
  }

  pub fn from_date_millis(self) -> Result<i64> {
    self.from_date_millis_at(&Local::now())
  }
}
