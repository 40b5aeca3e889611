use std::env;

use chrono_tz::Tz;

use crate::domain::services::row_mapper::SheetLayout;
use crate::infra::google::service_account::ServiceAccountKey;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

#[derive(Clone)]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    AccessToken(String),
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub sheet_layout: SheetLayout,
    pub timezone: Tz,
    pub invite_base_url: String,
    pub credentials: Credentials,
    pub token_uri: String,
    pub sheets_api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        let credentials = credentials_from_env();
        let token_uri = env::var("GOOGLE_TOKEN_URI")
            .ok()
            .or_else(|| match &credentials {
                Credentials::ServiceAccount(key) => key.token_uri.clone(),
                Credentials::AccessToken(_) => None,
            })
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());

        Self {
            port: env::var("PORT").unwrap_or_else(|_| "8787".to_string()).parse().expect("PORT must be a number"),
            spreadsheet_id: env::var("GOOGLE_SHEETS_ID").expect("GOOGLE_SHEETS_ID must be set"),
            sheet_name: env::var("GOOGLE_SHEET_NAME").unwrap_or_else(|_| "Sheet1".to_string()),
            sheet_layout: env::var("SHEET_LAYOUT")
                .unwrap_or_else(|_| "invitations".to_string())
                .parse()
                .expect("SHEET_LAYOUT must be 'invitations' or 'responses'"),
            timezone: env::var("SHEET_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Almaty".to_string())
                .parse()
                .expect("SHEET_TIMEZONE must be an IANA timezone name"),
            invite_base_url: env::var("INVITE_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            credentials,
            token_uri,
            sheets_api_base: env::var("SHEETS_API_BASE").unwrap_or_else(|_| DEFAULT_SHEETS_API_BASE.to_string()),
        }
    }
}

// JSON blob first, then the split email/key pair, then a pre-issued token.
fn credentials_from_env() -> Credentials {
    if let Ok(blob) = env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
        let key = ServiceAccountKey::from_json(&blob)
            .expect("GOOGLE_SERVICE_ACCOUNT_JSON must be a service account key file");
        return Credentials::ServiceAccount(key);
    }

    if let (Ok(client_email), Ok(private_key)) = (
        env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
        env::var("GOOGLE_PRIVATE_KEY"),
    ) {
        return Credentials::ServiceAccount(ServiceAccountKey::new(client_email, private_key));
    }

    let token = env::var("GOOGLE_ACCESS_TOKEN").expect(
        "Set GOOGLE_SERVICE_ACCOUNT_JSON, GOOGLE_SERVICE_ACCOUNT_EMAIL + GOOGLE_PRIVATE_KEY, or GOOGLE_ACCESS_TOKEN",
    );
    Credentials::AccessToken(token)
}
