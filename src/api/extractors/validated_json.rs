use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that has been parsed and validated before the handler runs.
///
/// The content type is not checked: the RSVP form posts JSON with whatever
/// header the browser picks.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedBody(e.to_string()))?;

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::MalformedBody(e.to_string()))?;

        value.validate().map_err(|errors| AppError::Validation { fields: field_names(&errors) })?;

        Ok(ValidatedJson(value))
    }
}

fn field_names(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors.field_errors().into_keys().map(|f| f.to_string()).collect();
    fields.sort();
    fields
}
