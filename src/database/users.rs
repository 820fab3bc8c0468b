use super::Database;
use async_trait::async_trait;
use sqlx::Error as SqlxError;

use crate::models::{Error, UserRecord};
use crate::store::UserStore;

impl Database {
    /// Get all users with birthdays on a specific date, year ignored
    pub async fn get_users_born_on(
        &self,
        month: u32,
        day: u32,
    ) -> Result<Vec<UserRecord>, SqlxError> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, email, username, to_char(birth_date, 'YYYY-MM-DD')
            FROM users
            WHERE birth_date IS NOT NULL
              AND EXTRACT(MONTH FROM birth_date) = $1
              AND EXTRACT(DAY FROM birth_date) = $2
            ORDER BY id
            "#,
        )
        .bind(month as i32)
        .bind(day as i32)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, email, display_name, birth_date)| UserRecord {
                id,
                email,
                display_name,
                birth_date,
            })
            .collect())
    }
}

#[async_trait]
impl UserStore for Database {
    async fn users_born_on(&self, month: u32, day: u32) -> Result<Vec<UserRecord>, Error> {
        Ok(self.get_users_born_on(month, day).await?)
    }
}
