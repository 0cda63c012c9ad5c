//! Budget-Table API Client
//!
//! Thin typed wrapper over the remote HTTP API. Each method issues exactly
//! one request; the refetch-after-mutation cycle belongs to the view layer.
//! `NotFound` gets a dedicated variant because the server answers 404 for
//! every operation on a row or period that no longer exists.

use std::fmt;

use crate::models::{Period, Row, RowCreate, RowField, TableData};

/// Base URL baked in at compile time; empty means same-origin requests.
fn default_base_url() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or("")
}

/// Origin of the current page, when running in a browser.
fn window_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

/// Errors returned by `TableClient` calls.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the row or period does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Http { status: u16, body: String },

    /// The request never produced a response.
    Request(String),

    /// The response body could not be deserialized into the expected type.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Request(msg) => write!(f, "request failed: {msg}"),
            ApiError::Decode(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client for the budget-table API.
///
/// Carries no state beyond the base URL and the `reqwest` handle. Failures
/// map to `ApiError` and are left to the caller; there are no retries.
#[derive(Debug, Clone)]
pub struct TableClient {
    http: reqwest::Client,
    base_url: String,
}

impl TableClient {
    /// Client against `API_BASE_URL`, falling back to the window origin when
    /// unset. `reqwest` wants absolute URLs, so same-origin requests resolve
    /// against the page origin instead of staying relative.
    pub fn new() -> Self {
        let base = default_base_url();
        if base.is_empty() {
            if let Some(origin) = window_origin() {
                return Self::with_base_url(origin);
            }
        }
        Self::with_base_url(base)
    }

    /// Client against an explicit origin, e.g. a test server.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/table{}", self.base_url, path)
    }

    /// `GET /api/table/`: the full table snapshot, rows nested.
    pub async fn fetch_table(&self) -> Result<TableData, ApiError> {
        let resp = self.http.get(self.url("/")).send().await.map_err(transport)?;
        json(check_status(resp).await?).await
    }

    /// `POST /api/table/init`: server-side seeding of the example table.
    pub async fn init_table(&self) -> Result<(), ApiError> {
        let resp = self.http.post(self.url("/init")).send().await.map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    /// `PUT /api/table/cells/{row}/{period}?value=`: upsert one cell.
    /// A `None` value omits the parameter, which the server reads as null.
    pub async fn update_cell(
        &self,
        row_id: u32,
        period_id: u32,
        value: Option<f64>,
    ) -> Result<(), ApiError> {
        let mut req = self.http.put(self.url(&format!("/cells/{row_id}/{period_id}")));
        if let Some(v) = value {
            req = req.query(&[("value", v)]);
        }
        let resp = req.send().await.map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    /// `PUT /api/table/rows/{row}?{field}=`: update one text field.
    pub async fn update_row_field(
        &self,
        row_id: u32,
        field: RowField,
        value: &str,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/rows/{row_id}")))
            .query(&[(field.as_str(), value)])
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    /// `POST /api/table/rows`: create a row (root or child).
    pub async fn create_row(&self, row: &RowCreate) -> Result<Row, ApiError> {
        let resp = self
            .http
            .post(self.url("/rows"))
            .json(row)
            .send()
            .await
            .map_err(transport)?;
        json(check_status(resp).await?).await
    }

    /// `DELETE /api/table/rows/{row}`: the server cascades to the subtree.
    pub async fn delete_row(&self, row_id: u32) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/rows/{row_id}")))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    /// `POST /api/table/periods[?name=]`: create a period; the server picks
    /// the name when none is given.
    pub async fn create_period(&self, name: Option<&str>) -> Result<Period, ApiError> {
        let mut req = self.http.post(self.url("/periods"));
        if let Some(name) = name {
            req = req.query(&[("name", name)]);
        }
        let resp = req.send().await.map_err(transport)?;
        json(check_status(resp).await?).await
    }

    /// `DELETE /api/table/periods/{period}`: drops the column and its cells.
    pub async fn delete_period(&self, period_id: u32) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/periods/{period_id}")))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }
}

impl Default for TableClient {
    fn default() -> Self {
        Self::new()
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Request(err.to_string())
}

/// Map non-success statuses to the appropriate `ApiError` variant.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status.as_u16() == 404 {
        return Err(ApiError::NotFound);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        body,
    })
}

async fn json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
}
