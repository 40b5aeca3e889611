use crate::domain::ports::TokenProvider;
use crate::error::AppError;
use async_trait::async_trait;

/// Hands out a token issued elsewhere, e.g. `gcloud auth print-access-token`
/// for local runs against a real sheet.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self, _scope: &str) -> Result<String, AppError> {
        if self.token.trim().is_empty() {
            return Err(AppError::Upstream("Static access token is empty".to_string()));
        }
        Ok(self.token.trim().to_string())
    }
}
