use crate::domain::ports::TokenProvider;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The subset of a Google service-account key file this service needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn new(client_email: String, private_key: String) -> Self {
        Self {
            client_email,
            private_key: unescape_newlines(&private_key),
            token_uri: None,
        }
    }

    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        let mut key: Self = serde_json::from_str(blob)?;
        key.private_key = unescape_newlines(&key.private_key);
        Ok(key)
    }
}

// Keys pasted into env files usually carry literal "\n" sequences.
fn unescape_newlines(pem: &str) -> String {
    pem.replace("\\n", "\n")
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtains access tokens with the OAuth2 JWT-bearer grant: an RS256 assertion
/// signed with the service-account key is traded for a bearer token at the
/// token endpoint. A fresh token is requested for every call.
pub struct ServiceAccountTokenProvider {
    client: Client,
    key: ServiceAccountKey,
    token_uri: String,
}

impl ServiceAccountTokenProvider {
    pub fn new(key: ServiceAccountKey, token_uri: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            key,
            token_uri,
        }
    }

    pub fn sign_assertion(&self, scope: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AppError::Upstream(format!("Invalid service account private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| AppError::Upstream(format!("Signing token assertion failed: {}", e)))
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    #[instrument(skip(self), fields(iss = %self.key.client_email))]
    async fn access_token(&self, scope: &str) -> Result<String, AppError> {
        let assertion = self.sign_assertion(scope)?;

        let res = self.client.post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Token endpoint connection error: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            error!("Token exchange rejected. Status: {}", status);
            return Err(AppError::Upstream(format!("Token exchange failed. Status: {}, Body: {}", status, text)));
        }

        let token: TokenResponse = res.json().await
            .map_err(|e| AppError::Upstream(format!("Malformed token response: {}", e)))?;

        debug!("Access token obtained");
        Ok(token.access_token)
    }
}
