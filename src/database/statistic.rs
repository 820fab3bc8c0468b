use super::Database;
use async_trait::async_trait;
use sqlx::Error as SqlxError;

use crate::models::{CounterRecord, Error};
use crate::store::StatisticStore;

impl Database {
    /// Get the first statistics row (lowest id)
    pub async fn get_first_statistic(&self) -> Result<Option<CounterRecord>, SqlxError> {
        let result: Option<(i64, i64)> =
            sqlx::query_as("SELECT id, users_online FROM statistics ORDER BY id LIMIT 1")
                .fetch_optional(self.pool())
                .await?;

        Ok(result.map(|(id, count)| CounterRecord {
            id: Some(id),
            count,
        }))
    }

    /// Save a statistics row, inserting it when it has no id or the id is gone
    pub async fn save_statistic(&self, record: &CounterRecord) -> Result<i64, SqlxError> {
        if let Some(id) = record.id {
            let updated: Option<(i64,)> = sqlx::query_as(
                "UPDATE statistics SET users_online = $1, updated_at = NOW() \
                 WHERE id = $2 RETURNING id",
            )
            .bind(record.count)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

            if let Some((id,)) = updated {
                return Ok(id);
            }
        }

        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO statistics (users_online) VALUES ($1) RETURNING id")
                .bind(record.count)
                .fetch_one(self.pool())
                .await?;

        Ok(id)
    }

    /// Increment the first statistics row inside one transaction.
    ///
    /// The advisory lock serializes concurrent callers, including the
    /// insert of the very first row.
    pub async fn increment_statistic(&self) -> Result<CounterRecord, SqlxError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext('statistics'))")
            .execute(&mut *tx)
            .await?;

        let updated: Option<(i64, i64)> = sqlx::query_as(
            r#"
            UPDATE statistics
            SET users_online = users_online + 1, updated_at = NOW()
            WHERE id = (SELECT id FROM statistics ORDER BY id LIMIT 1)
            RETURNING id, users_online
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;

        let (id, count) = match updated {
            Some(row) => row,
            None => {
                sqlx::query_as(
                    "INSERT INTO statistics (users_online) VALUES (1) RETURNING id, users_online",
                )
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        Ok(CounterRecord {
            id: Some(id),
            count,
        })
    }
}

#[async_trait]
impl StatisticStore for Database {
    async fn find_counter(&self) -> Result<Option<CounterRecord>, Error> {
        Ok(self.get_first_statistic().await?)
    }

    async fn save_counter(&self, record: &CounterRecord) -> Result<i64, Error> {
        Ok(self.save_statistic(record).await?)
    }

    async fn increment_counter(&self) -> Result<CounterRecord, Error> {
        Ok(self.increment_statistic().await?)
    }
}
