//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use lifeline_core::config::AppConfig;
use lifeline_core::result::AppResult;
use lifeline_core::types::{Clock, LocalCalendar};
use lifeline_database::DatabasePool;
use lifeline_monitor::service::{CheckInService, ContactService, SettingsService, UserService};
use lifeline_monitor::{EscalationEngine, MonitorStores};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Time source
    pub clock: Arc<dyn Clock>,
    /// Postgres pool; `None` on the in-memory provider
    pub database: Option<DatabasePool>,
    /// Device user resolution
    pub user_service: UserService,
    /// Check-in recording and statistics
    pub checkin_service: CheckInService,
    /// Settings read/update
    pub settings_service: SettingsService,
    /// Emergency contact management
    pub contact_service: ContactService,
    /// Escalation engine for manual evaluation
    pub engine: EscalationEngine,
}

impl AppState {
    /// Build the services over `stores`.
    pub fn new(
        config: Arc<AppConfig>,
        stores: &MonitorStores,
        engine: EscalationEngine,
        clock: Arc<dyn Clock>,
        calendar: LocalCalendar,
        database: Option<DatabasePool>,
    ) -> AppResult<Self> {
        let expected_time = config.schedule.parsed_next_expected_time()?;

        Ok(Self {
            user_service: UserService::new(
                Arc::clone(&stores.users),
                Arc::clone(&stores.settings),
                Arc::clone(&clock),
            ),
            checkin_service: CheckInService::new(
                Arc::clone(&stores.checkins),
                Arc::clone(&clock),
                calendar,
                expected_time,
            ),
            settings_service: SettingsService::new(
                Arc::clone(&stores.settings),
                Arc::clone(&clock),
            ),
            contact_service: ContactService::new(
                Arc::clone(&stores.contacts),
                Arc::clone(&clock),
                config.contacts.max_per_user,
            ),
            engine,
            clock,
            database,
            config,
        })
    }
}
