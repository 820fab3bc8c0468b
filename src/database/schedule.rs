use super::Database;
use chrono::{DateTime, Utc};
use sqlx::Error as SqlxError;

use crate::schedule::{Schedule, ScheduleType};

impl Database {
    /// Get all schedules from the database
    pub async fn get_all_schedules(&self) -> Result<Vec<Schedule>, SqlxError> {
        let rows: Vec<(i32, String, ScheduleType, String, Option<DateTime<Utc>>, bool)> =
            sqlx::query_as(
                "SELECT id, name, schedule_type, cron_expression, start_at, enabled \
                 FROM schedules ORDER BY id",
            )
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, name, schedule_type, cron_expression, start_at, enabled)| Schedule {
                    id,
                    name,
                    schedule_type,
                    cron_expression,
                    start_at,
                    enabled,
                },
            )
            .collect())
    }

    /// Create or update a named timer
    pub async fn upsert_schedule(
        &self,
        name: &str,
        schedule_type: ScheduleType,
        cron_expression: &str,
        start_at: Option<DateTime<Utc>>,
        enabled: bool,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT INTO schedules (name, schedule_type, cron_expression, start_at, enabled)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name)
            DO UPDATE SET
                schedule_type = $2,
                cron_expression = $3,
                start_at = $4,
                enabled = $5,
                updated_at = NOW()
            "#,
        )
        .bind(name)
        .bind(schedule_type)
        .bind(cron_expression)
        .bind(start_at)
        .bind(enabled)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
