//! Health proxy handler.
//!
//! The page script cannot reach the backend origin directly, so the single
//! outbound probe goes through here: one GET to this route is one GET to the
//! configured backend health endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::instrument;

use crate::middleware::RequestId;
use crate::state::AppState;

/// Health proxy handler.
///
/// On success, relays the backend's health report verbatim. Every failure
/// kind (transport, non-2xx status, unparseable body) is caught here, logged
/// with its specific cause, and collapsed into a 502 with an opaque body;
/// the page renders all of them as the single "unavailable" state.
#[instrument(name = "api::health", skip(state, request_id))]
pub async fn health(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    match state.backend.check_health().await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            tracing::error!(
                request_id = %request_id.0,
                backend = %state.backend.health_url(),
                error = %err,
                "Backend health probe failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "backend unreachable" })),
            )
                .into_response()
        }
    }
}
