use chrono::{DateTime, Utc};
use thiserror::Error;

/// Type of scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "schedule_type", rename_all = "lowercase")]
pub enum ScheduleType {
    Birthday,
}

/// A registered timer
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: i32,
    pub name: String,
    pub schedule_type: ScheduleType,
    pub cron_expression: String, // Cron expression (e.g., "0 0 8 * * *" for 8 AM daily)
    /// No run fires before this instant
    pub start_at: Option<DateTime<Utc>>,
    pub enabled: bool,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },
}
