/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "userhooks=info";

/// Name under which the daily birthday timer is registered
pub const BIRTHDAY_TIMER_NAME: &str = "BirthdayTimer";

/// Default birthday cron expression (08:00 every day)
pub const DEFAULT_BIRTHDAY_CRON: &str = "0 0 8 * * *";

/// Default first run of the birthday timer
pub const DEFAULT_BIRTHDAY_START_DATE: &str = "2024-06-08T08:00:00Z";

/// Postgres notification channel carrying login events
pub const DEFAULT_LOGIN_CHANNEL: &str = "user_login";

/// Default sender address for outgoing mail
pub const DEFAULT_MAIL_FROM: &str = "noreply@example.com";

/// Default signature closing birthday emails
pub const DEFAULT_MAIL_SIGNATURE: &str = "Your Company";

/// Seconds between schedule reloads when nothing can be scheduled
pub const SCHEDULE_RETRY_SECS: u64 = 60;

/// Seconds before reconnecting a failed login listener
pub const LISTENER_RETRY_SECS: u64 = 5;

/// Timeout for a single mail relay request
pub const MAIL_TIMEOUT_SECS: u64 = 10;
