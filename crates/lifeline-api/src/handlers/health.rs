//! Health check handler.

use axum::Json;
use axum::extract::State;

use lifeline_core::error::AppError;

use crate::dto::response::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /health
///
/// Answers 503 when the Postgres pool cannot run a query.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database = match &state.database {
        Some(db) => {
            db.health_check().await.map_err(|e| {
                tracing::warn!(error = %e, "Database health check failed");
                AppError::service_unavailable("Database unavailable")
            })?;
            "connected"
        }
        None => "memory",
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: state.clock.now(),
        database: database.to_string(),
    }))
}
