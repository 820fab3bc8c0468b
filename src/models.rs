use std::sync::Arc;

use chrono_tz::Tz;

use crate::{
    config::Config,
    database::Database,
    handlers::{BirthdayNotifier, LoginCounter},
    mailer::Mailer,
};

/// The single persisted record tracking logged-in users
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterRecord {
    /// Assigned by the store on first write
    pub id: Option<i64>,
    pub count: i64,
}

impl CounterRecord {
    /// A record that has never been saved, counting one login
    pub fn initial() -> Self {
        Self { id: None, count: 1 }
    }
}

/// A registered user as seen by the birthday mailer (read-only)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    /// Birth date exactly as the store renders it; parsed by the consumer
    pub birth_date: String,
}

/// Service state shared by the trigger loops
pub struct Data {
    /// Database connection
    pub db: Database,
    /// Zone deciding what "today" means for scheduled runs
    pub timezone: Tz,
    pub login_counter: LoginCounter,
    pub birthday_notifier: BirthdayNotifier,
}

impl Data {
    /// Wire both handlers to the database and the given mailer
    pub fn new(db: Database, config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        let store = Arc::new(db.clone());

        Self {
            login_counter: LoginCounter::new(store.clone(), config.counter_strategy),
            birthday_notifier: BirthdayNotifier::new(store, mailer, config.templates.clone()),
            timezone: config.timezone,
            db,
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
