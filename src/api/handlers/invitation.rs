use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::api::dtos::{
    requests::CreateInviteRequest,
    responses::{InvitationResponse, InviteCreatedResponse},
};
use crate::api::extractors::validated_json::ValidatedJson;
use crate::domain::services::messages;
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<CreateInviteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.invitation_service.create_invitation(payload.into_invitation()).await?;

    Ok(Json(InviteCreatedResponse {
        success: true,
        message: messages::INVITATION_CREATED.to_string(),
        uuid: created.uuid,
        invite_link: created.invite_link,
    }))
}

pub async fn get_invite(
    State(state): State<Arc<AppState>>,
    uuid: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    // An id that does not even decode was never issued.
    let Path(uuid) = uuid.map_err(|e| AppError::NotFound(format!("invitation path: {}", e)))?;
    let invitation = state.invitation_service.view_invitation(&uuid).await?;

    Ok(Json(InvitationResponse {
        success: true,
        invitation,
    }))
}
