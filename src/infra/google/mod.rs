pub mod service_account;
pub mod sheets_client;
pub mod static_token;
