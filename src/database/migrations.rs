use super::Database;
use sqlx::Error as SqlxError;

impl Database {
    /// Run database migrations to create tables
    pub(super) async fn run_migrations(&self) -> Result<(), SqlxError> {
        self.create_statistics_table().await?;
        self.create_users_table().await?;
        self.create_schedule_tables().await?;
        Ok(())
    }

    async fn create_statistics_table(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS statistics (
                id BIGSERIAL PRIMARY KEY,
                users_online BIGINT NOT NULL DEFAULT 0 CHECK (users_online >= 0),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// The registration flow owns this table; it is only created so a fresh
    /// database can boot.
    async fn create_users_table(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                email TEXT NOT NULL,
                username TEXT NOT NULL,
                birth_date DATE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn create_schedule_tables(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            DO $$ BEGIN
                CREATE TYPE schedule_type AS ENUM ('birthday');
            EXCEPTION
                WHEN duplicate_object THEN NULL;
            END $$;
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedules (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                schedule_type schedule_type NOT NULL,
                cron_expression TEXT NOT NULL,
                start_at TIMESTAMPTZ,
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
