use crate::error::AppError;
use async_trait::async_trait;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self, scope: &str) -> Result<String, AppError>;
}

/// Row-level access to one spreadsheet. Row numbers are 1-based, matching
/// A1 notation: `get_all_rows()[i]` is row `i + 1`.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn append_row(&self, sheet: &str, row: &[String]) -> Result<(), AppError>;
    async fn get_all_rows(&self, sheet: &str) -> Result<Vec<Vec<String>>, AppError>;
    async fn update_row(&self, sheet: &str, row_number: usize, row: &[String]) -> Result<(), AppError>;
}
