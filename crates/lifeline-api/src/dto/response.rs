//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lifeline_entity::checkin::CheckIn;
use lifeline_monitor::UserEvaluation;

/// `GET /api/checkin/last`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastCheckInResponse {
    /// Most recent check-in, if any.
    pub last_check_in: Option<CheckIn>,
}

/// `GET /api/checkin/today`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    /// Whether the user has checked in on the current local date.
    pub has_checked_in: bool,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

/// `POST /api/monitor/check`.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorCheckResponse {
    /// Always `true`; evaluation failures are reported in `evaluation`.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// When the check ran.
    pub timestamp: DateTime<Utc>,
    /// What the engine decided for the caller.
    pub evaluation: UserEvaluation,
}

/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` while the process is serving.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
    /// `connected` for Postgres, `memory` for the in-memory provider.
    pub database: String,
}
