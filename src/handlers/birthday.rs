use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::mailer::{MailError, Mailer};
use crate::models::UserRecord;
use crate::store::UserStore;
use crate::utils::datetime::{BirthDateError, calculate_years, format_date_display, parse_birth_date};
use crate::utils::message_formatter::{BirthdayTemplates, build_birthday_email};

/// Why a single user was skipped
#[derive(Debug, Error)]
enum NotifyError {
    #[error(transparent)]
    BirthDate(#[from] BirthDateError),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Outcome of one daily run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayRunReport {
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Emails every user whose birthday is today
pub struct BirthdayNotifier {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    templates: BirthdayTemplates,
}

impl BirthdayNotifier {
    pub fn new(users: Arc<dyn UserStore>, mailer: Arc<dyn Mailer>, templates: BirthdayTemplates) -> Self {
        Self {
            users,
            mailer,
            templates,
        }
    }

    /// Check for birthdays on `today` and send one email per user.
    ///
    /// Each user is handled on its own: a bad date or a failed send is logged
    /// and the remaining users are still processed.
    pub async fn run_daily(&self, today: NaiveDate) -> BirthdayRunReport {
        let mut report = BirthdayRunReport::default();
        let date_str = format_date_display(today.month(), today.day());

        info!("Checking birthdays for {}", date_str);

        let users = match self.users.users_born_on(today.month(), today.day()).await {
            Ok(users) => users,
            Err(e) => {
                error!("Error executing birthday check: {}", e);
                return report;
            }
        };

        report.matched = users.len();
        if users.is_empty() {
            info!("No birthdays found for today");
            return report;
        }

        info!("Found {} birthday(s) today", users.len());

        for user in &users {
            match self.notify_user(user, today.year(), &date_str).await {
                Ok(()) => {
                    report.sent += 1;
                    info!("Sent birthday email to {} (user {})", user.email, user.id);
                }
                Err(e) => {
                    report.failed += 1;
                    error!("Error sending birthday email to user {} ({}): {}", user.email, user.id, e);
                }
            }
        }

        report
    }

    async fn notify_user(&self, user: &UserRecord, current_year: i32, date_str: &str) -> Result<(), NotifyError> {
        let birth_date = parse_birth_date(&user.birth_date)?;
        let years = calculate_years(birth_date.year(), current_year);
        let email = build_birthday_email(&self.templates, &user.display_name, years, date_str);

        self.mailer
            .send_email(&email.subject, &email.body, &user.email)
            .await?;
        Ok(())
    }
}
