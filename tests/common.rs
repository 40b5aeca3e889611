#![allow(dead_code)]

use rsvp_backend::{
    api::router::create_router,
    config::{Config, Credentials, DEFAULT_SHEETS_API_BASE, DEFAULT_TOKEN_URI},
    domain::ports::SheetStore,
    domain::services::row_mapper::SheetLayout,
    error::AppError,
    infra::factory::{bootstrap_state, state_with_store},
    infra::google::service_account::ServiceAccountKey,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_PRIVATE_KEY: &str = include_str!("keys/test_service_account.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("keys/test_service_account.pub.pem");
pub const FAKE_ACCESS_TOKEN: &str = "ya29.fake-access-token";
pub const SERVICE_ACCOUNT_EMAIL: &str = "rsvp@wedding-sheets.iam.gserviceaccount.com";

// --- In-memory sheet ---

#[derive(Default)]
pub struct MemorySheetStore {
    rows: Mutex<Vec<Vec<String>>>,
    pub appends: AtomicUsize,
    pub reads: AtomicUsize,
    pub updates: AtomicUsize,
    fail: bool,
}

impl MemorySheetStore {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, row: Vec<&str>) {
        self.rows.lock().unwrap().push(row.into_iter().map(String::from).collect());
    }

    pub fn calls(&self) -> usize {
        self.appends.load(Ordering::SeqCst) + self.reads.load(Ordering::SeqCst) + self.updates.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Upstream("Sheets append failed. Status: 503 Service Unavailable, Body: backendError".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn append_row(&self, _sheet: &str, row: &[String]) -> Result<(), AppError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(())
    }

    async fn get_all_rows(&self, _sheet: &str) -> Result<Vec<Vec<String>>, AppError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        // Like the Sheets API, drop trailing empty cells.
        let rows = self.rows.lock().unwrap().iter()
            .map(|row| {
                let mut row = row.clone();
                while row.last().is_some_and(|c| c.is_empty()) {
                    row.pop();
                }
                row
            })
            .collect();
        Ok(rows)
    }

    async fn update_row(&self, _sheet: &str, row_number: usize, row: &[String]) -> Result<(), AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        rows[row_number - 1] = row.to_vec();
        Ok(())
    }
}

// --- App under test ---

pub fn test_config(layout: SheetLayout) -> Config {
    Config {
        port: 0,
        spreadsheet_id: "1TestSpreadsheetId".to_string(),
        sheet_name: "Sheet1".to_string(),
        sheet_layout: layout,
        timezone: chrono_tz::Asia::Almaty,
        invite_base_url: "https://wedding.example/".to_string(),
        credentials: Credentials::AccessToken("unused".to_string()),
        token_uri: DEFAULT_TOKEN_URI.to_string(),
        sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemorySheetStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(SheetLayout::Invitations, MemorySheetStore::default())
    }

    pub fn with_layout(layout: SheetLayout) -> Self {
        Self::with_store(layout, MemorySheetStore::default())
    }

    pub fn with_store(layout: SheetLayout, store: MemorySheetStore) -> Self {
        let store = Arc::new(store);
        let state = state_with_store(&test_config(layout), store.clone());
        Self {
            router: create_router(Arc::new(state)),
            store,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        send(&self.router, method, uri, body).await
    }

    pub async fn send_raw(&self, method: &str, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    router.clone().oneshot(request).await.unwrap()
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// --- Fake Google endpoints (token + Sheets v4 values) ---

pub struct FakeGoogleState {
    pub token_status: StatusCode,
    pub token_requests: AtomicUsize,
    pub sheets_requests: AtomicUsize,
    pub assertions: Mutex<Vec<String>>,
    pub rows: Mutex<Vec<Vec<String>>>,
}

pub struct FakeGoogle {
    pub base_url: String,
    pub state: Arc<FakeGoogleState>,
}

impl FakeGoogle {
    pub async fn start(token_status: StatusCode) -> Self {
        let state = Arc::new(FakeGoogleState {
            token_status,
            token_requests: AtomicUsize::new(0),
            sheets_requests: AtomicUsize::new(0),
            assertions: Mutex::new(Vec::new()),
            rows: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/token", post(fake_token))
            .route(
                "/v4/spreadsheets/{spreadsheet_id}/values/{range}",
                get(fake_read).post(fake_append).put(fake_update),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.base_url)
    }

    /// Router wired to the real reqwest clients, pointed at this fake.
    pub fn router(&self) -> Router {
        let mut config = test_config(SheetLayout::Invitations);
        config.credentials = Credentials::ServiceAccount(ServiceAccountKey::new(
            SERVICE_ACCOUNT_EMAIL.to_string(),
            TEST_PRIVATE_KEY.to_string(),
        ));
        config.token_uri = self.token_uri();
        config.sheets_api_base = format!("{}/v4", self.base_url);

        create_router(Arc::new(bootstrap_state(&config)))
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.state.rows.lock().unwrap().clone()
    }
}

async fn fake_token(
    State(state): State<Arc<FakeGoogleState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.token_requests.fetch_add(1, Ordering::SeqCst);

    if form.get("grant_type").map(String::as_str) != Some("urn:ietf:params:oauth:grant-type:jwt-bearer") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "unsupported_grant_type" }))).into_response();
    }
    if let Some(assertion) = form.get("assertion") {
        state.assertions.lock().unwrap().push(assertion.clone());
    }

    if state.token_status != StatusCode::OK {
        return (state.token_status, Json(json!({ "error": "invalid_grant" }))).into_response();
    }

    Json(json!({
        "access_token": FAKE_ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
    .into_response()
}

fn authorized(state: &FakeGoogleState, headers: &HeaderMap) -> bool {
    state.sheets_requests.fetch_add(1, Ordering::SeqCst);
    headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", FAKE_ACCESS_TOKEN).as_str())
}

fn first_row(body: &Value) -> Vec<String> {
    body["values"][0]
        .as_array()
        .map(|cells| cells.iter().map(|c| c.as_str().unwrap_or_default().to_string()).collect())
        .unwrap_or_default()
}

async fn fake_read(
    State(state): State<Arc<FakeGoogleState>>,
    Path((_spreadsheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let rows = state.rows.lock().unwrap().clone();
    if rows.is_empty() {
        return Json(json!({ "range": range, "majorDimension": "ROWS" })).into_response();
    }
    Json(json!({ "range": range, "majorDimension": "ROWS", "values": rows })).into_response()
}

async fn fake_append(
    State(state): State<Arc<FakeGoogleState>>,
    Path((_spreadsheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !range.ends_with(":append") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    state.rows.lock().unwrap().push(first_row(&body));
    Json(json!({ "updates": { "updatedRows": 1 } })).into_response()
}

async fn fake_update(
    State(state): State<Arc<FakeGoogleState>>,
    Path((_spreadsheet_id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    // "Sheet1!A3:I3" -> 3
    let row_number = range
        .split('!')
        .nth(1)
        .and_then(|cells| cells.split(':').next())
        .map(|start| start.trim_start_matches(|c: char| c.is_ascii_alphabetic()))
        .and_then(|digits| digits.parse::<usize>().ok());

    let Some(row_number) = row_number.filter(|n| *n >= 1) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut rows = state.rows.lock().unwrap();
    if rows.len() < row_number {
        rows.resize(row_number, Vec::new());
    }
    rows[row_number - 1] = first_row(&body);
    Json(json!({ "updatedRange": range, "updatedRows": 1 })).into_response()
}
