use crate::domain::ports::{SheetStore, TokenProvider, SPREADSHEETS_SCOPE};
use crate::domain::services::row_mapper::column_letter;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Sheets v4 `spreadsheets.values` client. Every call fetches a bearer token
/// first; when that fails no request reaches the Sheets API.
pub struct GoogleSheetsClient {
    client: Client,
    api_base: String,
    spreadsheet_id: String,
    token_provider: Arc<dyn TokenProvider>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsClient {
    pub fn new(api_base: String, spreadsheet_id: String, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_base,
            spreadsheet_id,
            token_provider,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}{}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(range),
            suffix
        )
    }

    async fn bearer(&self) -> Result<String, AppError> {
        self.token_provider.access_token(SPREADSHEETS_SCOPE).await
    }

    async fn ensure_success(res: Response, operation: &str) -> Result<Response, AppError> {
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        error!("Sheets {} rejected. Status: {}", operation, status);
        Err(AppError::Upstream(format!("Sheets {} failed. Status: {}, Body: {}", operation, status, text)))
    }
}

/// Sheet names outside `[A-Za-z0-9_]` must be quoted in A1 notation.
pub fn a1_sheet(sheet: &str) -> String {
    if !sheet.is_empty() && sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        sheet.to_string()
    } else {
        format!("'{}'", sheet.replace('\'', "''"))
    }
}

fn connection_error(operation: &str, e: reqwest::Error) -> AppError {
    AppError::Upstream(format!("Sheets {} connection error: {}", operation, e))
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    #[instrument(skip(self, row))]
    async fn append_row(&self, sheet: &str, row: &[String]) -> Result<(), AppError> {
        let token = self.bearer().await?;
        let url = self.values_url(&a1_sheet(sheet), ":append");

        let res = self.client.post(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [row], "majorDimension": "ROWS" }))
            .send()
            .await
            .map_err(|e| connection_error("append", e))?;

        Self::ensure_success(res, "append").await?;
        debug!("Appended row to {}", sheet);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, AppError> {
        let token = self.bearer().await?;
        let url = self.values_url(&a1_sheet(sheet), "");

        let res = self.client.get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| connection_error("read", e))?;

        let res = Self::ensure_success(res, "read").await?;
        let range: ValueRange = res.json().await
            .map_err(|e| AppError::Upstream(format!("Malformed Sheets read response: {}", e)))?;

        let rows: Vec<Vec<String>> = range.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();

        debug!("Read {} rows from {}", rows.len(), sheet);
        Ok(rows)
    }

    #[instrument(skip(self, row))]
    async fn update_row(&self, sheet: &str, row_number: usize, row: &[String]) -> Result<(), AppError> {
        if row_number == 0 || row.is_empty() {
            return Err(AppError::Internal);
        }

        let token = self.bearer().await?;
        let range = format!(
            "{}!A{}:{}{}",
            a1_sheet(sheet),
            row_number,
            column_letter(row.len()),
            row_number
        );
        let url = self.values_url(&range, "");

        let res = self.client.put(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "range": range, "values": [row], "majorDimension": "ROWS" }))
            .send()
            .await
            .map_err(|e| connection_error("update", e))?;

        Self::ensure_success(res, "update").await?;
        debug!("Updated row {} of {}", row_number, sheet);
        Ok(())
    }
}
