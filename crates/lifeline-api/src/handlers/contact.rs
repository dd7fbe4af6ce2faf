//! Emergency contact handlers.

use axum::Json;
use axum::extract::{Path, State};

use lifeline_core::error::AppError;
use lifeline_core::types::ContactId;
use lifeline_entity::contact::EmergencyContact;

use crate::dto::request::{CreateContactRequest, UpdateContactRequest, validated};
use crate::dto::response::SuccessResponse;
use crate::error::ApiResult;
use crate::extractors::DeviceUser;
use crate::state::AppState;

/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    user: DeviceUser,
) -> ApiResult<Json<Vec<EmergencyContact>>> {
    Ok(Json(state.contact_service.list(user.id()).await?))
}

/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    user: DeviceUser,
    Json(req): Json<CreateContactRequest>,
) -> ApiResult<Json<EmergencyContact>> {
    let new = validated(req)?.into_new_contact()?;
    let contact = state.contact_service.create(user.id(), new).await?;
    Ok(Json(contact))
}

/// PUT /api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    user: DeviceUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateContactRequest>,
) -> ApiResult<Json<EmergencyContact>> {
    let id = parse_contact_id(&id)?;
    let patch = validated(req)?.into_patch()?;
    let contact = state.contact_service.update(user.id(), &id, patch).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    user: DeviceUser,
    Path(id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let id = parse_contact_id(&id)?;
    state.contact_service.delete(user.id(), &id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

fn parse_contact_id(raw: &str) -> Result<ContactId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("Contact {raw} not found")))
}
