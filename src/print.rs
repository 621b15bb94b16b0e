use std::io::{self, Write};

use crate::jira::types::GroupedActivities;

/// Write the grouped activities, oldest day first.
pub fn print<W: Write>(out: &mut W, activities: &GroupedActivities) -> io::Result<()> {
  for (date, issues) in activities.days() {
    writeln!(out, "{}:", date)?;
    for (key, title) in issues {
      writeln!(out, "{} - {}", key, title)?;
    }
    // Two blank lines after each day
    writeln!(out)?;
    writeln!(out)?;
  }
  Ok(())
}
