//! Handler for the verification page.
//!
//! Renders the single page: the static version badge, the heading and
//! description, the health panel in its initial loading state, and the
//! deployment notes. The live health data is fetched by the page script
//! through the health proxy, never here.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Verification page handler.
#[instrument(name = "home::index", skip(state, request_id))]
pub async fn index(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);

    let html = state
        .tera
        .render("home.html", &context)
        .map_err(AppError::from)
        .with_request_id(&request_id)?;
    Ok(Html(html))
}
