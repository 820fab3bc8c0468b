use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::CounterRecord;
use crate::store::StatisticStore;

/// A successful authentication reported by the login pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginEvent {
    /// Login name, informational only
    pub login: Option<String>,
}

impl LoginEvent {
    /// Build an event from a notification payload (the login name, possibly empty)
    pub fn from_payload(payload: &str) -> Self {
        let login = payload.trim();
        Self {
            login: (!login.is_empty()).then(|| login.to_string()),
        }
    }

    fn describe(&self) -> &str {
        self.login.as_deref().unwrap_or("<unknown>")
    }
}

/// How the online-user counter is updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterStrategy {
    /// Fetch, increment, save. Not isolated; a failed fetch starts a new record at 1.
    #[default]
    ReadModifyWrite,
    /// Single isolated increment in the database
    Atomic,
}

impl FromStr for CounterStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read-modify-write" => Ok(Self::ReadModifyWrite),
            "atomic" => Ok(Self::Atomic),
            other => Err(format!(
                "unknown counter strategy '{}' (expected 'read-modify-write' or 'atomic')",
                other
            )),
        }
    }
}

impl fmt::Display for CounterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadModifyWrite => write!(f, "read-modify-write"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// Maintains the online-user counter after each login
pub struct LoginCounter {
    store: Arc<dyn StatisticStore>,
    strategy: CounterStrategy,
}

impl LoginCounter {
    pub fn new(store: Arc<dyn StatisticStore>, strategy: CounterStrategy) -> Self {
        Self { store, strategy }
    }

    /// Count one login. Failures are logged, never returned to the trigger.
    pub async fn on_login(&self, event: &LoginEvent) {
        match self.strategy {
            CounterStrategy::ReadModifyWrite => self.read_modify_write(event).await,
            CounterStrategy::Atomic => self.increment(event).await,
        }
    }

    async fn read_modify_write(&self, event: &LoginEvent) {
        // A lookup error is handled exactly like a missing record
        let record = match self.store.find_counter().await {
            Ok(Some(mut record)) => {
                record.count += 1;
                record
            }
            Ok(None) => {
                info!("No counter record found, initializing it");
                CounterRecord::initial()
            }
            Err(e) => {
                warn!("Counter lookup failed, starting a new record at 1: {}", e);
                CounterRecord::initial()
            }
        };

        match self.store.save_counter(&record).await {
            Ok(id) => info!(
                "Login by {} counted, {} user(s) online (record {})",
                event.describe(),
                record.count,
                id
            ),
            Err(e) => error!("Failed to save counter after login by {}: {}", event.describe(), e),
        }
    }

    async fn increment(&self, event: &LoginEvent) {
        match self.store.increment_counter().await {
            Ok(record) => info!(
                "Login by {} counted, {} user(s) online (record {})",
                event.describe(),
                record.count,
                record.id.unwrap_or_default()
            ),
            Err(e) => error!("Failed to increment counter after login by {}: {}", event.describe(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryStatistics;

    fn counter(store: &Arc<MemoryStatistics>, strategy: CounterStrategy) -> LoginCounter {
        LoginCounter::new(store.clone(), strategy)
    }

    fn login() -> LoginEvent {
        LoginEvent::from_payload("alice")
    }

    #[test]
    fn test_login_event_from_payload() {
        assert_eq!(
            LoginEvent::from_payload(" alice "),
            LoginEvent {
                login: Some("alice".to_string())
            }
        );
        assert_eq!(LoginEvent::from_payload(""), LoginEvent { login: None });
    }

    #[test]
    fn test_counter_strategy_from_str() {
        assert_eq!("read-modify-write".parse::<CounterStrategy>(), Ok(CounterStrategy::ReadModifyWrite));
        assert_eq!("ATOMIC".parse::<CounterStrategy>(), Ok(CounterStrategy::Atomic));
        assert!("eventual".parse::<CounterStrategy>().is_err());
        assert_eq!(CounterStrategy::default(), CounterStrategy::ReadModifyWrite);
    }

    #[tokio::test]
    async fn test_first_login_creates_record() {
        let store = Arc::new(MemoryStatistics::default());
        counter(&store, CounterStrategy::ReadModifyWrite).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 1 }]);
    }

    #[tokio::test]
    async fn test_login_increments_existing_record() {
        let store = Arc::new(MemoryStatistics::with_count(41));
        counter(&store, CounterStrategy::ReadModifyWrite).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 42 }]);
    }

    #[tokio::test]
    async fn test_repeated_logins_keep_one_record() {
        let store = Arc::new(MemoryStatistics::default());
        let counter = counter(&store, CounterStrategy::ReadModifyWrite);

        for _ in 0..3 {
            counter.on_login(&login()).await;
        }

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 3 }]);
    }

    #[tokio::test]
    async fn test_lookup_failure_starts_new_record() {
        let store = Arc::new(MemoryStatistics::with_count(7).failing_lookups());
        counter(&store, CounterStrategy::ReadModifyWrite).on_login(&login()).await;

        // The existing record is left alone and a fresh one counts 1
        assert_eq!(
            store.records(),
            vec![
                CounterRecord { id: Some(1), count: 7 },
                CounterRecord { id: Some(2), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_save_failure_is_swallowed() {
        let store = Arc::new(MemoryStatistics::with_count(3).failing_saves());
        counter(&store, CounterStrategy::ReadModifyWrite).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 3 }]);
    }

    #[tokio::test]
    async fn test_atomic_increment() {
        let store = Arc::new(MemoryStatistics::with_count(9));
        counter(&store, CounterStrategy::Atomic).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 10 }]);
    }

    #[tokio::test]
    async fn test_atomic_first_login_creates_record() {
        let store = Arc::new(MemoryStatistics::default());
        counter(&store, CounterStrategy::Atomic).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 1 }]);
    }

    #[tokio::test]
    async fn test_atomic_failure_does_not_reset() {
        let store = Arc::new(MemoryStatistics::with_count(7).failing_lookups());
        counter(&store, CounterStrategy::Atomic).on_login(&login()).await;

        assert_eq!(store.records(), vec![CounterRecord { id: Some(1), count: 7 }]);
    }
}
