//! Calendar-day arithmetic in the server's local time zone.
//!
//! "Today", week boundaries, and the next expected check-in are all computed
//! through one [`LocalCalendar`] so that every component agrees on where a
//! calendar day starts. The UTC offset is resolved per instant, so zones
//! with daylight saving time map each timestamp to its own wall-clock date.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::AppError;

/// The zone a [`LocalCalendar`] reads wall-clock time in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarZone {
    /// A constant offset from UTC.
    Fixed(FixedOffset),
    /// A named IANA zone.
    Named(Tz),
    /// Whatever zone the host is configured with.
    Host,
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
            Self::Host => write!(f, "host"),
        }
    }
}

/// Calendar dates and wall-clock instants in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalCalendar {
    zone: CalendarZone,
}

impl LocalCalendar {
    /// Calendar with an explicit offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            zone: CalendarZone::Fixed(offset),
        }
    }

    /// Calendar at UTC.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Calendar in a named zone.
    pub fn named(tz: Tz) -> Self {
        Self {
            zone: CalendarZone::Named(tz),
        }
    }

    /// Calendar in the host's zone.
    pub fn host() -> Self {
        Self {
            zone: CalendarZone::Host,
        }
    }

    /// Calendar from configuration: a named zone wins over a fixed offset,
    /// and the host zone is used when neither is set.
    pub fn from_config(
        timezone: Option<&str>,
        offset_minutes: Option<i32>,
    ) -> Result<Self, AppError> {
        if let Some(name) = timezone.map(str::trim).filter(|n| !n.is_empty()) {
            let tz: Tz = name
                .parse()
                .map_err(|_| AppError::configuration(format!("Unknown time zone '{name}'")))?;
            return Ok(Self::named(tz));
        }
        match offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .map(Self::new)
                .ok_or_else(|| {
                    AppError::configuration(format!("UTC offset out of range: {minutes} minutes"))
                }),
            None => Ok(Self::host()),
        }
    }

    /// The zone in use.
    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// Local calendar date of an instant.
    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        match self.zone {
            CalendarZone::Fixed(offset) => ts.with_timezone(&offset).date_naive(),
            CalendarZone::Named(tz) => ts.with_timezone(&tz).date_naive(),
            CalendarZone::Host => ts.with_timezone(&Local).date_naive(),
        }
    }

    /// Local calendar date of `now`.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.date_of(now)
    }

    /// Whether two instants fall on the same local date.
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.date_of(a) == self.date_of(b)
    }

    /// The instant at which `date` reads `time` on the local wall clock.
    ///
    /// A repeated wall-clock time resolves to its first occurrence; a skipped
    /// one is read with the offset in effect before the transition.
    pub fn at_local(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let naive = date.and_time(time);
        match self.zone {
            CalendarZone::Fixed(offset) => wall_clock_to_utc(&offset, naive),
            CalendarZone::Named(tz) => wall_clock_to_utc(&tz, naive),
            CalendarZone::Host => wall_clock_to_utc(&Local, naive),
        }
    }

    /// Sunday that starts the week containing `date`.
    pub fn week_start(date: NaiveDate) -> NaiveDate {
        date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
    }

    /// The next occurrence of `time` strictly after `now`: today if it has
    /// not passed yet, otherwise tomorrow.
    pub fn next_occurrence(&self, now: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
        let today = self.today(now);
        let candidate = self.at_local(today, time);
        if candidate > now {
            candidate
        } else {
            self.at_local(today + Duration::days(1), time)
        }
    }
}

impl Default for LocalCalendar {
    fn default() -> Self {
        Self::host()
    }
}

fn wall_clock_to_utc<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(ts) = zone.from_local_datetime(&naive).earliest() {
        return ts.with_timezone(&Utc);
    }
    let before = zone
        .offset_from_utc_datetime(&(naive - Duration::days(1)))
        .fix();
    Utc.from_utc_datetime(&(naive - Duration::seconds(i64::from(before.local_minus_utc()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(hours_east: i32) -> LocalCalendar {
        LocalCalendar::new(FixedOffset::east_opt(hours_east * 3600).unwrap())
    }

    fn new_york() -> LocalCalendar {
        LocalCalendar::named(chrono_tz::America::New_York)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_date_of_respects_offset() {
        let cal = calendar(2);
        let ts = Utc.with_ymd_and_hms(2024, 3, 4, 23, 30, 0).unwrap();
        assert_eq!(cal.date_of(ts), ymd(2024, 3, 5));
        assert_eq!(LocalCalendar::utc().date_of(ts), ymd(2024, 3, 4));
    }

    #[test]
    fn test_date_of_follows_daylight_saving() {
        let cal = new_york();

        // 23:30 EST on Jan 15.
        let winter = Utc.with_ymd_and_hms(2026, 1, 16, 4, 30, 0).unwrap();
        assert_eq!(cal.date_of(winter), ymd(2026, 1, 15));

        // 00:30 EDT on Jul 16; a frozen winter offset would say 23:30 Jul 15.
        let summer = Utc.with_ymd_and_hms(2026, 7, 16, 4, 30, 0).unwrap();
        assert_eq!(cal.date_of(summer), ymd(2026, 7, 16));

        let summer_late = Utc.with_ymd_and_hms(2026, 7, 16, 3, 30, 0).unwrap();
        assert_eq!(cal.date_of(summer_late), ymd(2026, 7, 15));
        assert!(!cal.same_day(summer_late, summer));
    }

    #[test]
    fn test_at_local_converts_back_to_utc() {
        let cal = calendar(-5);
        let at = cal.at_local(ymd(2024, 3, 4), hm(20, 0));
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 3, 5, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_at_local_across_daylight_saving() {
        let cal = new_york();
        assert_eq!(
            cal.at_local(ymd(2026, 1, 15), hm(20, 0)),
            Utc.with_ymd_and_hms(2026, 1, 16, 1, 0, 0).unwrap()
        );
        assert_eq!(
            cal.at_local(ymd(2026, 7, 15), hm(20, 0)),
            Utc.with_ymd_and_hms(2026, 7, 16, 0, 0, 0).unwrap()
        );
        // 02:30 does not exist on 2026-03-08; read with the EST offset.
        assert_eq!(
            cal.at_local(ymd(2026, 3, 8), hm(2, 30)),
            Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap()
        );
        // 01:30 happens twice on 2026-11-01; the first one is EDT.
        assert_eq!(
            cal.at_local(ymd(2026, 11, 1), hm(1, 30)),
            Utc.with_ymd_and_hms(2026, 11, 1, 5, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_host_zone_is_resolved_per_instant() {
        let cal = LocalCalendar::host();
        for ts in [
            Utc.with_ymd_and_hms(2026, 1, 16, 4, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 7, 16, 4, 30, 0).unwrap(),
        ] {
            assert_eq!(cal.date_of(ts), ts.with_timezone(&Local).date_naive());
        }
    }

    #[test]
    fn test_from_config() {
        assert_eq!(
            LocalCalendar::from_config(Some("America/New_York"), Some(480)).unwrap(),
            new_york()
        );
        assert_eq!(LocalCalendar::from_config(None, Some(120)).unwrap(), calendar(2));
        assert_eq!(
            LocalCalendar::from_config(Some("  "), None).unwrap().zone(),
            CalendarZone::Host
        );
        assert!(LocalCalendar::from_config(Some("Mars/Olympus"), None).is_err());
        assert!(LocalCalendar::from_config(None, Some(48 * 60)).is_err());
    }

    #[test]
    fn test_week_start_is_sunday() {
        // 2024-03-06 is a Wednesday.
        assert_eq!(LocalCalendar::week_start(ymd(2024, 3, 6)), ymd(2024, 3, 3));
        assert_eq!(LocalCalendar::week_start(ymd(2024, 3, 3)), ymd(2024, 3, 3));
    }

    #[test]
    fn test_next_occurrence_rolls_to_tomorrow() {
        let cal = LocalCalendar::utc();
        let eight_pm = hm(20, 0);
        let morning = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        assert_eq!(
            cal.next_occurrence(morning, eight_pm),
            Utc.with_ymd_and_hms(2024, 3, 4, 20, 0, 0).unwrap()
        );
        let night = Utc.with_ymd_and_hms(2024, 3, 4, 21, 0, 0).unwrap();
        assert_eq!(
            cal.next_occurrence(night, eight_pm),
            Utc.with_ymd_and_hms(2024, 3, 5, 20, 0, 0).unwrap()
        );
    }
}
