//! Check-in domain entities.

pub mod model;
pub mod stats;

pub use model::{CheckIn, NewCheckIn};
pub use stats::{CheckInStats, WeekdayCount, build_stats, consecutive_days};
