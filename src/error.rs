use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::services::messages;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {}", fields.join(", "))]
    Validation { fields: Vec<String> },
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn invalid_field(field: &str) -> Self {
        AppError::Validation { fields: vec![field.to_string()] }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { fields } => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": messages::REQUIRED_FIELDS_MISSING, "fields": fields }),
            ),
            AppError::MalformedBody(detail) => {
                warn!("Rejected request body: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "success": false, "error": messages::REQUEST_FAILED }),
                )
            }
            AppError::NotFound(what) => {
                warn!("Not found: {}", what);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "success": false, "error": messages::INVITATION_NOT_FOUND }),
                )
            }
            AppError::Upstream(detail) => {
                error!("Upstream error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": messages::SAVE_FAILED }),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": messages::REQUEST_FAILED }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
