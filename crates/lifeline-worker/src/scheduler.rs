//! Cron scheduler driving the escalation engine.

use std::time::Duration;

use chrono::{Local, NaiveTime, Offset, TimeZone, Timelike, Utc};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler, JobSchedulerError};

use lifeline_core::config::ScheduleConfig;
use lifeline_core::error::AppError;
use lifeline_core::types::{CalendarZone, LocalCalendar};
use lifeline_monitor::EscalationEngine;

/// Runs [`EscalationEngine::evaluate_all_users`] on a schedule.
pub struct MonitorScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Engine evaluated by every job
    engine: EscalationEngine,
    /// One-off run after startup
    startup: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for MonitorScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorScheduler").finish()
    }
}

impl MonitorScheduler {
    /// Create a new scheduler
    pub async fn new(engine: EscalationEngine) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            engine,
            startup: None,
        })
    }

    /// Register the periodic run and one run per configured daily time.
    ///
    /// Daily times fire on the calendar's wall clock, so they keep their
    /// local hour across daylight saving transitions.
    pub async fn register(
        &self,
        config: &ScheduleConfig,
        calendar: &LocalCalendar,
    ) -> Result<(), AppError> {
        self.register_batch("periodic", &config.hourly_cron, CalendarZone::Fixed(Utc.fix()))
            .await?;

        for time in config.parsed_daily_times()? {
            let expression = daily_cron_expression(time);
            let label = format!("daily {}", time.format("%H:%M"));
            self.register_batch(&label, &expression, calendar.zone())
                .await?;
        }

        tracing::info!(zone = %calendar.zone(), "All evaluation schedules registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Run one batch after `delay`.
    pub fn spawn_startup_run(&mut self, delay: Duration) {
        let engine = self.engine.clone();
        self.startup = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            run_batch(&engine, "startup").await;
        }));
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        if let Some(handle) = self.startup.take() {
            handle.abort();
        }

        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register_batch(
        &self,
        label: &str,
        expression: &str,
        zone: CalendarZone,
    ) -> Result<(), AppError> {
        let engine = self.engine.clone();
        let job_label = label.to_string();
        let job = match zone {
            CalendarZone::Fixed(offset) => batch_job(expression, offset, engine, job_label),
            CalendarZone::Named(tz) => batch_job(expression, tz, engine, job_label),
            CalendarZone::Host => batch_job(expression, Local, engine, job_label),
        }
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid cron expression '{expression}' for {label}: {e}"
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add {label} schedule: {e}"))
        })?;

        tracing::info!(schedule = %expression, zone = %zone, "Registered: {label} evaluation");
        Ok(())
    }
}

fn batch_job<TZ>(
    expression: &str,
    zone: TZ,
    engine: EscalationEngine,
    label: String,
) -> Result<CronJob, JobSchedulerError>
where
    TZ: TimeZone + Send + Sync + 'static,
    TZ::Offset: Send + Sync,
{
    CronJob::new_async_tz(expression, zone, move |_uuid, _lock| {
        let engine = engine.clone();
        let label = label.clone();
        Box::pin(async move {
            run_batch(&engine, &label).await;
        })
    })
}

async fn run_batch(engine: &EscalationEngine, trigger: &str) {
    tracing::debug!(trigger, "Starting scheduled evaluation");
    if let Err(e) = engine.evaluate_all_users().await {
        tracing::error!(trigger, error = %e, "Scheduled evaluation skipped");
    }
}

/// Six-field cron expression firing daily at wall-clock `time`.
pub fn daily_cron_expression(time: NaiveTime) -> String {
    format!("0 {} {} * * *", time.minute(), time.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_daily_expression_uses_wall_clock() {
        assert_eq!(daily_cron_expression(hm(9, 0)), "0 0 9 * * *");
        assert_eq!(daily_cron_expression(hm(20, 0)), "0 0 20 * * *");
        assert_eq!(daily_cron_expression(hm(2, 30)), "0 30 2 * * *");
    }
}
