use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info};

use super::utils::find_next_schedule;
use super::{Schedule, ScheduleType};
use crate::constants::SCHEDULE_RETRY_SECS;
use crate::models::Data;
use crate::shutdown::sleep_or_shutdown;
use crate::utils::timezone::local_today;

/// Start the schedule manager that monitors and runs scheduled tasks
pub fn start_schedule_manager(data: Arc<Data>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Schedule manager started");

        loop {
            // Load schedules from database
            let schedules = match data.db.get_all_schedules().await {
                Ok(schedules) => schedules,
                Err(e) => {
                    error!("Failed to load schedules from database: {}", e);
                    if sleep_or_shutdown(Duration::from_secs(SCHEDULE_RETRY_SECS), &mut shutdown).await {
                        break;
                    }
                    continue;
                }
            };

            let now = Utc::now();
            let Some((schedule, next_time)) = find_next_schedule(&schedules, now, data.timezone) else {
                info!(
                    "No valid schedules found, checking again in {} seconds",
                    SCHEDULE_RETRY_SECS
                );
                if sleep_or_shutdown(Duration::from_secs(SCHEDULE_RETRY_SECS), &mut shutdown).await {
                    break;
                }
                continue;
            };

            let wait_duration = (next_time - now).to_std().unwrap_or(Duration::ZERO);
            info!(
                "Next schedule '{}' (#{}, cron: '{}') will run at {} ({} minutes)",
                schedule.name,
                schedule.id,
                schedule.cron_expression,
                next_time.with_timezone(&data.timezone),
                wait_duration.as_secs() / 60
            );

            if sleep_or_shutdown(wait_duration, &mut shutdown).await {
                break;
            }

            run_schedule(&data, &schedule).await;
        }

        info!("Schedule manager stopped");
    })
}

/// Run a scheduled task based on its type
async fn run_schedule(data: &Data, schedule: &Schedule) {
    match schedule.schedule_type {
        ScheduleType::Birthday => {
            let today = local_today(Utc::now(), data.timezone);
            let report = data.birthday_notifier.run_daily(today).await;
            info!(
                "Schedule '{}' finished: {} matched, {} sent, {} failed",
                schedule.name, report.matched, report.sent, report.failed
            );
        }
    }
}
