//! Missed-day arithmetic.

use chrono::{DateTime, Utc};

use lifeline_core::types::LocalCalendar;

/// Whole days since the last check-in, or 0 when the last check-in falls on
/// today's local date.
///
/// Elapsed time is measured in 24-hour units, so a check-in late yesterday
/// evening still yields 0 early the next morning.
pub fn days_missed(last: DateTime<Utc>, now: DateTime<Utc>, calendar: &LocalCalendar) -> i64 {
    if calendar.same_day(last, now) {
        return 0;
    }
    (now - last).num_days().max(0)
}
