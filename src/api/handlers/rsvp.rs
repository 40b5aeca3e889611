use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::SubmitRsvpRequest, responses::MessageResponse};
use crate::api::extractors::validated_json::ValidatedJson;
use crate::domain::services::messages;
use crate::error::AppError;
use std::sync::Arc;

pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<SubmitRsvpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let submission = payload.into_submission()?;
    state.invitation_service.submit_rsvp(submission).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: messages::RSVP_ACCEPTED.to_string(),
    }))
}
