//! Settings handlers.

use axum::Json;
use axum::extract::State;

use lifeline_entity::settings::UserSettings;

use crate::dto::request::{UpdateSettingsRequest, validated};
use crate::error::ApiResult;
use crate::extractors::DeviceUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn get_settings(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<UserSettings>> {
    Ok(Json(state.settings_service.get(user.id()).await?))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    user: DeviceUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> ApiResult<Json<UserSettings>> {
    let patch = validated(req)?.into();
    let settings = state.settings_service.update(user.id(), patch).await?;
    Ok(Json(settings))
}
