//! In-memory stand-ins for the data and notification services

use async_trait::async_trait;
use std::sync::Mutex;

use crate::mailer::{MailError, Mailer};
use crate::models::{CounterRecord, Error, UserRecord};
use crate::store::{StatisticStore, UserStore};

/// Counter table kept in a vector, with switchable failures
#[derive(Default)]
pub struct MemoryStatistics {
    records: Mutex<Vec<CounterRecord>>,
    fail_lookups: bool,
    fail_saves: bool,
}

impl MemoryStatistics {
    /// A store already holding one record with id 1
    pub fn with_count(count: i64) -> Self {
        Self {
            records: Mutex::new(vec![CounterRecord {
                id: Some(1),
                count,
            }]),
            ..Default::default()
        }
    }

    /// Every read fails, as if the database were unreachable
    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn records(&self) -> Vec<CounterRecord> {
        self.records.lock().unwrap().clone()
    }

    fn insert(records: &mut Vec<CounterRecord>, count: i64) -> CounterRecord {
        let id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        let record = CounterRecord {
            id: Some(id),
            count,
        };
        records.push(record.clone());
        record
    }
}

#[async_trait]
impl StatisticStore for MemoryStatistics {
    async fn find_counter(&self) -> Result<Option<CounterRecord>, Error> {
        if self.fail_lookups {
            return Err("simulated lookup failure".into());
        }
        let records = self.records.lock().unwrap();
        Ok(records.iter().min_by_key(|r| r.id).cloned())
    }

    async fn save_counter(&self, record: &CounterRecord) -> Result<i64, Error> {
        if self.fail_saves {
            return Err("simulated save failure".into());
        }
        let mut records = self.records.lock().unwrap();

        if let Some(id) = record.id
            && let Some(existing) = records.iter_mut().find(|r| r.id == Some(id))
        {
            existing.count = record.count;
            return Ok(id);
        }

        let inserted = Self::insert(&mut records, record.count);
        Ok(inserted.id.unwrap_or_default())
    }

    async fn increment_counter(&self) -> Result<CounterRecord, Error> {
        if self.fail_lookups || self.fail_saves {
            return Err("simulated database failure".into());
        }
        let mut records = self.records.lock().unwrap();

        if let Some(existing) = records.iter_mut().min_by_key(|r| r.id) {
            existing.count += 1;
            return Ok(existing.clone());
        }

        Ok(Self::insert(&mut records, 1))
    }
}

/// Returns its users as the already-filtered result of any birthday query
#[derive(Default)]
pub struct MemoryUsers {
    users: Vec<UserRecord>,
    fail: bool,
    queries: Mutex<Vec<(u32, u32)>>,
}

impl MemoryUsers {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// (month, day) pairs the store was asked for
    pub fn queries(&self) -> Vec<(u32, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn users_born_on(&self, month: u32, day: u32) -> Result<Vec<UserRecord>, Error> {
        self.queries.lock().unwrap().push((month, day));
        if self.fail {
            return Err("simulated query failure".into());
        }
        Ok(self.users.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentEmail {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

/// Records sent emails; rejects the configured recipients
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
    rejected: Vec<String>,
}

impl RecordingMailer {
    pub fn rejecting(recipients: &[&str]) -> Self {
        Self {
            rejected: recipients.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, subject: &str, body: &str, recipient: &str) -> Result<(), MailError> {
        if self.rejected.iter().any(|r| r == recipient) {
            return Err(MailError::Rejected {
                status: 550,
                detail: "mailbox unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(SentEmail {
            subject: subject.to_string(),
            body: body.to_string(),
            recipient: recipient.to_string(),
        });
        Ok(())
    }
}

pub fn user(id: i64, name: &str, birth_date: &str) -> UserRecord {
    UserRecord {
        id,
        email: format!("{}@example.com", name),
        display_name: name.to_string(),
        birth_date: birth_date.to_string(),
    }
}
