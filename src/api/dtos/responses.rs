use crate::domain::models::invitation::PublicInvitation;
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCreatedResponse {
    pub success: bool,
    pub message: String,
    pub uuid: String,
    pub invite_link: String,
}

#[derive(Serialize)]
pub struct InvitationResponse {
    pub success: bool,
    pub invitation: PublicInvitation,
}
