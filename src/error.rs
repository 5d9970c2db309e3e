//! Application error types and their HTTP rendering.
//!
//! Handler errors are paired with the request id they occurred under so the
//! error log line can be correlated with the request span. Rendering is a
//! minimal self-contained HTML page; the health proxy handles its own
//! failures and never goes through this path.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use http::header::CACHE_CONTROL;
use uuid::Uuid;

use crate::config::CACHE_CONTROL_ERROR;
use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// An [`AppError`] carrying the id of the request that produced it.
#[derive(Debug)]
pub struct AppErrorResponse {
    error: AppError,
    request_id: Option<Uuid>,
}

impl From<AppError> for AppErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

/// Attach the current request id to a handler error.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E: Into<AppError>> ResultExt<T> for Result<T, E> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|e| AppErrorResponse {
            error: e.into(),
            request_id: Some(request_id.0),
        })
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        tracing::error!(
            request_id = ?self.request_id,
            error = %self.error,
            "Request failed"
        );

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
    <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
    <div class="container">
        <div class="error-page">
            <h1>Error {}</h1>
            <p>{}</p>
            <a href="/">Return to homepage</a>
        </div>
    </div>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            "Internal server error"
        );

        (status, [(CACHE_CONTROL, CACHE_CONTROL_ERROR)], Html(body)).into_response()
    }
}
