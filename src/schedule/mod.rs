/// Schedule management modules
mod manager;
mod types;
mod utils;

// Re-export public types and functions
pub use manager::start_schedule_manager;
pub use types::{Schedule, ScheduleError, ScheduleType};
pub use utils::parse_cron;
