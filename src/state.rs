use std::sync::Arc;
use crate::domain::services::invitation_service::InvitationService;

#[derive(Clone)]
pub struct AppState {
    pub invitation_service: Arc<InvitationService>,
}
