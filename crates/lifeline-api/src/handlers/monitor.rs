//! Manual monitor trigger.

use axum::Json;
use axum::extract::State;

use crate::dto::response::MonitorCheckResponse;
use crate::extractors::DeviceUser;
use crate::state::AppState;

/// POST /api/monitor/check
///
/// Runs one evaluation for the caller. Engine failures are reported inside
/// `evaluation.error` rather than as an HTTP error.
pub async fn check(State(state): State<AppState>, user: DeviceUser) -> Json<MonitorCheckResponse> {
    let evaluation = state.engine.evaluate_user(user.id()).await;
    let message = if evaluation.is_failure() {
        "Check finished with errors"
    } else {
        "Check completed"
    };

    Json(MonitorCheckResponse {
        success: true,
        message: message.to_string(),
        timestamp: evaluation.evaluated_at,
        evaluation,
    })
}
