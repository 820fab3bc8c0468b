/// Trigger handlers for login events and the daily birthday timer
mod birthday;
mod login;

// Re-export handler types
pub use birthday::BirthdayNotifier;
pub use login::{CounterStrategy, LoginCounter, LoginEvent};
