/// Pure cron and schedule calculation utilities
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::{error, warn};

use super::{Schedule, ScheduleError};

/// Parse a 6 or 7 field cron expression (seconds first)
pub fn parse_cron(expression: &str) -> Result<cron::Schedule, ScheduleError> {
    cron::Schedule::from_str(expression).map_err(|e| ScheduleError::InvalidCron {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}

/// Next instant the cron fires in `timezone`, strictly after `now` and no
/// earlier than `start_at`
pub fn next_occurrence(
    cron_schedule: &cron::Schedule,
    start_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    timezone: Tz,
) -> Option<DateTime<Utc>> {
    // The start instant itself is a valid firing time
    let anchor = match start_at {
        Some(start) if start > now => start - TimeDelta::seconds(1),
        _ => now,
    };

    cron_schedule
        .after(&anchor.with_timezone(&timezone))
        .next()
        .map(|next| next.with_timezone(&Utc))
}

/// Find the enabled schedule that fires first, with its firing instant
pub fn find_next_schedule(
    schedules: &[Schedule],
    now: DateTime<Utc>,
    timezone: Tz,
) -> Option<(Schedule, DateTime<Utc>)> {
    schedules
        .iter()
        .filter(|s| s.enabled)
        .filter_map(|schedule| {
            let cron_schedule = parse_cron(&schedule.cron_expression)
                .map_err(|e| error!("Skipping schedule '{}': {}", schedule.name, e))
                .ok()?;

            let next_time = next_occurrence(&cron_schedule, schedule.start_at, now, timezone)
                .or_else(|| {
                    warn!(
                        "No upcoming time found for schedule '{}' with cron '{}'",
                        schedule.name, schedule.cron_expression
                    );
                    None
                })?;

            Some((schedule.clone(), next_time))
        })
        .min_by_key(|(_, next_time)| *next_time)
}
