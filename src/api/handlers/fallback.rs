use axum::{http::StatusCode, response::IntoResponse};
use crate::domain::services::messages;

pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
}
