//! Weekly statistics and streak computation.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use lifeline_core::types::LocalCalendar;

use super::model::CheckIn;

/// Weekday labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Check-in count for one weekday of the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    /// Short weekday label.
    pub name: String,
    /// Check-ins on that day.
    pub count: u32,
}

/// Summary shown on the check-in screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStats {
    /// Check-ins since the start of the current Sunday-based week.
    pub weekly_total: u32,
    /// Seven slots, Sunday through Saturday.
    pub weekly_data: Vec<WeekdayCount>,
    /// Unbroken run of calendar days ending today.
    pub consecutive_days: u32,
    /// Time of the most recent check-in.
    pub last_check_in: Option<DateTime<Utc>>,
    /// Next expected check-in time.
    pub next_expected: DateTime<Utc>,
}

/// Count the unbroken chain of check-in dates walking back from `today`.
///
/// Dates are deduplicated. A user without a check-in today has a streak of 0.
pub fn consecutive_days<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut expected = today;
    let mut streak = 0;
    for date in unique.iter().rev() {
        if *date == expected {
            streak += 1;
            expected -= Duration::days(1);
        } else {
            break;
        }
    }
    streak
}

/// Build the stats for a user's check-in history.
///
/// `history` may be in any order.
pub fn build_stats(
    history: &[CheckIn],
    calendar: &LocalCalendar,
    now: DateTime<Utc>,
    expected_time: NaiveTime,
) -> CheckInStats {
    let today = calendar.today(now);
    let week_start = LocalCalendar::week_start(today);

    let mut counts = [0u32; 7];
    for check_in in history {
        let date = calendar.date_of(check_in.checkin_time);
        if date >= week_start && date <= today {
            counts[date.weekday().num_days_from_sunday() as usize] += 1;
        }
    }

    let weekly_data: Vec<WeekdayCount> = WEEKDAY_LABELS
        .iter()
        .zip(counts)
        .map(|(name, count)| WeekdayCount {
            name: (*name).to_string(),
            count,
        })
        .collect();

    CheckInStats {
        weekly_total: counts.iter().sum(),
        weekly_data,
        consecutive_days: consecutive_days(
            history.iter().map(|c| calendar.date_of(c.checkin_time)),
            today,
        ),
        last_check_in: history.iter().map(|c| c.checkin_time).max(),
        next_expected: calendar.next_occurrence(now, expected_time),
    }
}
