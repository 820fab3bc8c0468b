/// Narrow data-service interfaces the handlers depend on
use async_trait::async_trait;

use crate::models::{CounterRecord, Error, UserRecord};

/// Access to the online-user counter
#[async_trait]
pub trait StatisticStore: Send + Sync {
    /// Fetch the first counter record, if any
    async fn find_counter(&self) -> Result<Option<CounterRecord>, Error>;

    /// Insert the record when it has no id, update it otherwise.
    /// Returns the id the record is stored under.
    async fn save_counter(&self, record: &CounterRecord) -> Result<i64, Error>;

    /// Increment the counter in a single isolated step, creating it at 1 if absent
    async fn increment_counter(&self) -> Result<CounterRecord, Error>;
}

/// Read-only access to registered users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users whose birth date falls on the given month and day, any year
    async fn users_born_on(&self, month: u32, day: u32) -> Result<Vec<UserRecord>, Error>;
}
