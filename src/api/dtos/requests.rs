use crate::domain::models::invitation::Attendance;
use crate::domain::services::invitation_service::{NewInvitation, RsvpSubmission};
use crate::error::AppError;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

// Every field is optional at the serde level so a missing field surfaces as a
// validation error next to the others instead of a deserialization failure.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitRsvpRequest {
    pub attendance: Option<String>,
    pub name: Option<String>,
    pub guest: Option<String>,
    pub message: Option<String>,
    pub uuid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateInviteRequest {
    pub name: Option<String>,
    pub comment: Option<String>,
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn owned(value: &Option<String>) -> String {
    trimmed(value).unwrap_or_default().to_string()
}

impl Validate for SubmitRsvpRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match trimmed(&self.attendance).map(str::parse::<Attendance>) {
            None => errors.add("attendance", ValidationError::new("required")),
            Some(Err(_)) => errors.add("attendance", ValidationError::new("invalid")),
            // A name is only needed from guests who are coming.
            Some(Ok(Attendance::Yes)) if trimmed(&self.name).is_none() => {
                errors.add("name", ValidationError::new("required"))
            }
            Some(Ok(_)) => {}
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Validate for CreateInviteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if trimmed(&self.name).is_none() {
            errors.add("name", ValidationError::new("required"));
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl SubmitRsvpRequest {
    pub fn into_submission(self) -> Result<RsvpSubmission, AppError> {
        let attendance = trimmed(&self.attendance)
            .and_then(|a| a.parse::<Attendance>().ok())
            .ok_or_else(|| AppError::invalid_field("attendance"))?;

        Ok(RsvpSubmission {
            attendance,
            name: owned(&self.name),
            guest: owned(&self.guest),
            message: owned(&self.message),
            uuid: trimmed(&self.uuid).map(str::to_string),
        })
    }
}

impl CreateInviteRequest {
    pub fn into_invitation(self) -> NewInvitation {
        NewInvitation {
            admin_name: owned(&self.name),
            admin_comment: owned(&self.comment),
        }
    }
}
