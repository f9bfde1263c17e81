use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

/// Process-level failures: configuration and server bootstrap.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Per-symbol fetch failures. These never propagate past the batch
/// scheduler: a failed symbol is logged and dropped, the scan continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("upstream rejected the API key")]
    Unauthorized,

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream response missing {0}")]
    MissingFacet(&'static str),
}

/// Scan-fatal failures surfaced to the caller as a single error message.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No Polygon.io API key configured. Please add your API key in Settings.")]
    MissingCredential,

    #[error("Scan failed: {0}")]
    ScanFailed(String),
}

impl IntoResponse for ScanError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ScanError::MissingCredential => StatusCode::BAD_REQUEST,
            ScanError::ScanFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
