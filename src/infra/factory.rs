use std::sync::Arc;
use tracing::info;

use crate::config::{Config, Credentials};
use crate::state::AppState;
use crate::domain::ports::{SheetStore, TokenProvider};
use crate::domain::services::invitation_service::InvitationService;
use crate::infra::google::{
    service_account::ServiceAccountTokenProvider,
    sheets_client::GoogleSheetsClient,
    static_token::StaticTokenProvider,
};

pub fn build_token_provider(config: &Config) -> Arc<dyn TokenProvider> {
    match &config.credentials {
        Credentials::ServiceAccount(key) => {
            info!("Using service account {} for Sheets access", key.client_email);
            Arc::new(ServiceAccountTokenProvider::new(key.clone(), config.token_uri.clone()))
        }
        Credentials::AccessToken(token) => {
            info!("Using pre-issued access token for Sheets access");
            Arc::new(StaticTokenProvider::new(token.clone()))
        }
    }
}

pub fn state_with_store(config: &Config, store: Arc<dyn SheetStore>) -> AppState {
    let invitation_service = Arc::new(InvitationService::new(
        store,
        config.sheet_name.clone(),
        config.sheet_layout,
        config.timezone,
        config.invite_base_url.clone(),
    ));

    AppState { invitation_service }
}

pub fn bootstrap_state(config: &Config) -> AppState {
    let token_provider = build_token_provider(config);
    let sheets = Arc::new(GoogleSheetsClient::new(
        config.sheets_api_base.clone(),
        config.spreadsheet_id.clone(),
        token_provider,
    ));

    info!(
        "Writing to sheet '{}' of spreadsheet {} ({:?} layout)",
        config.sheet_name, config.spreadsheet_id, config.sheet_layout
    );
    state_with_store(config, sheets)
}
