//! Check-in handlers.

use axum::Json;
use axum::extract::{Query, State};

use lifeline_core::error::ErrorKind;
use lifeline_entity::checkin::{CheckIn, CheckInStats};

use crate::dto::request::HistoryQuery;
use crate::dto::response::{LastCheckInResponse, TodayResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::DeviceUser;
use crate::state::AppState;

/// POST /api/checkin
pub async fn check_in(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<CheckIn>> {
    let checkin = state
        .checkin_service
        .record_check_in(user.id())
        .await
        .map_err(|e| match e.kind {
            ErrorKind::Conflict => ApiError::already_checked_in(e),
            _ => ApiError::from(e),
        })?;
    Ok(Json(checkin))
}

/// GET /api/checkin/stats
pub async fn stats(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<CheckInStats>> {
    Ok(Json(state.checkin_service.weekly_stats(user.id()).await?))
}

/// GET /api/checkin/last
pub async fn last(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<LastCheckInResponse>> {
    let last_check_in = state.checkin_service.last_check_in(user.id()).await?;
    Ok(Json(LastCheckInResponse { last_check_in }))
}

/// GET /api/checkin/today
pub async fn today(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<TodayResponse>> {
    let has_checked_in = state
        .checkin_service
        .has_checked_in_today(user.id())
        .await?;
    Ok(Json(TodayResponse { has_checked_in }))
}

/// GET /api/checkin/history?limit=N
pub async fn history(
    State(state): State<AppState>,
    user: DeviceUser,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<CheckIn>>> {
    let entries = state
        .checkin_service
        .history(user.id(), query.limit)
        .await?;
    Ok(Json(entries))
}
