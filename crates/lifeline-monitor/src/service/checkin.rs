//! Check-in recording and statistics.

use std::sync::Arc;

use chrono::NaiveTime;
use tracing::info;

use lifeline_core::error::AppError;
use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, LocalCalendar, UserId};
use lifeline_database::traits::CheckInStore;
use lifeline_entity::checkin::{CheckIn, CheckInStats, NewCheckIn, build_stats};

/// Default page size for history queries.
pub const DEFAULT_HISTORY_LIMIT: i64 = 30;
/// Largest page size for history queries.
pub const MAX_HISTORY_LIMIT: i64 = 365;

/// Records check-ins and summarizes history.
#[derive(Debug, Clone)]
pub struct CheckInService {
    checkins: Arc<dyn CheckInStore>,
    clock: Arc<dyn Clock>,
    calendar: LocalCalendar,
    expected_time: NaiveTime,
}

impl CheckInService {
    /// Creates a new check-in service.
    pub fn new(
        checkins: Arc<dyn CheckInStore>,
        clock: Arc<dyn Clock>,
        calendar: LocalCalendar,
        expected_time: NaiveTime,
    ) -> Self {
        Self {
            checkins,
            clock,
            calendar,
            expected_time,
        }
    }

    /// Record a check-in for today. A second check-in on the same local date
    /// is rejected with a conflict.
    pub async fn record_check_in(&self, user_id: &UserId) -> AppResult<CheckIn> {
        let now = self.clock.now();
        let new = NewCheckIn {
            user_id: user_id.clone(),
            checkin_time: now,
            checkin_date: self.calendar.today(now),
        };

        let created = self
            .checkins
            .insert_if_absent(new)
            .await?
            .ok_or_else(|| AppError::conflict("Already checked in today"))?;

        info!(user_id = %user_id, date = %created.checkin_date, "Check-in recorded");
        Ok(created)
    }

    /// Most recent check-in.
    pub async fn last_check_in(&self, user_id: &UserId) -> AppResult<Option<CheckIn>> {
        self.checkins.find_last(user_id).await
    }

    /// Whether the user has checked in on today's local date.
    pub async fn has_checked_in_today(&self, user_id: &UserId) -> AppResult<bool> {
        let today = self.calendar.today(self.clock.now());
        self.checkins.exists_on(user_id, today).await
    }

    /// Weekly counts, streak, and next expected check-in.
    pub async fn weekly_stats(&self, user_id: &UserId) -> AppResult<CheckInStats> {
        let history = self.checkins.list_by_user(user_id, None).await?;
        Ok(build_stats(
            &history,
            &self.calendar,
            self.clock.now(),
            self.expected_time,
        ))
    }

    /// Check-ins newest first.
    pub async fn history(&self, user_id: &UserId, limit: Option<i64>) -> AppResult<Vec<CheckIn>> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);
        self.checkins.list_by_user(user_id, Some(limit)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use lifeline_core::error::ErrorKind;
    use lifeline_core::types::FixedClock;
    use lifeline_database::MemoryStore;

    fn service(clock: Arc<FixedClock>) -> CheckInService {
        service_in(clock, LocalCalendar::utc())
    }

    fn service_in(clock: Arc<FixedClock>, calendar: LocalCalendar) -> CheckInService {
        CheckInService::new(
            Arc::new(MemoryStore::new()),
            clock,
            calendar,
            NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        )
    }

    fn user() -> UserId {
        UserId::parse("device-1").unwrap()
    }

    #[tokio::test]
    async fn test_second_same_day_check_in_is_rejected() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()));
        let svc = service(clock.clone());

        svc.record_check_in(&user()).await.unwrap();
        clock.advance(Duration::hours(10));
        let err = svc.record_check_in(&user()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(svc.history(&user(), None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_today_flag_follows_calendar_date() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 23, 30, 0).unwrap()));
        let svc = service(clock.clone());

        assert!(!svc.has_checked_in_today(&user()).await.unwrap());
        svc.record_check_in(&user()).await.unwrap();
        assert!(svc.has_checked_in_today(&user()).await.unwrap());

        // Forty minutes later it is a new date.
        clock.advance(Duration::minutes(40));
        assert!(!svc.has_checked_in_today(&user()).await.unwrap());
        svc.record_check_in(&user()).await.unwrap();
        assert!(svc.has_checked_in_today(&user()).await.unwrap());
    }

    #[tokio::test]
    async fn test_local_midnight_in_daylight_saving_zone() {
        // 23:30 EDT on 2026-07-15.
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2026, 7, 16, 3, 30, 0).unwrap()));
        let svc = service_in(
            clock.clone(),
            LocalCalendar::named(chrono_tz::America::New_York),
        );

        let first = svc.record_check_in(&user()).await.unwrap();
        assert_eq!(first.checkin_date.to_string(), "2026-07-15");

        // 00:30 EDT, a new local date.
        clock.advance(Duration::hours(1));
        assert!(!svc.has_checked_in_today(&user()).await.unwrap());
        let second = svc.record_check_in(&user()).await.unwrap();
        assert_eq!(second.checkin_date.to_string(), "2026-07-16");

        // 23:00 EDT the same local date.
        clock.advance(Duration::hours(22) + Duration::minutes(30));
        let err = svc.record_check_in(&user()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_stats_streak_across_days() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()));
        let svc = service(clock.clone());

        for _ in 0..3 {
            svc.record_check_in(&user()).await.unwrap();
            clock.advance(Duration::days(1));
        }
        clock.advance(Duration::days(-1));

        let stats = svc.weekly_stats(&user()).await.unwrap();
        assert_eq!(stats.consecutive_days, 3);
        assert_eq!(stats.weekly_total, 3);
        assert_eq!(
            stats.last_check_in,
            Some(Utc.with_ymd_and_hms(2024, 3, 6, 8, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_history_limit_is_clamped() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()));
        let svc = service(clock.clone());
        for _ in 0..3 {
            svc.record_check_in(&user()).await.unwrap();
            clock.advance(Duration::days(1));
        }
        assert_eq!(svc.history(&user(), Some(0)).await.unwrap().len(), 1);
        assert_eq!(svc.history(&user(), Some(2)).await.unwrap().len(), 2);
    }
}
