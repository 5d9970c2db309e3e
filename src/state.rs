//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::backend::BackendClient;
use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, Tera template engine, and the
/// client used to probe the backend health endpoint.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub backend: BackendClient,
}

impl AppState {
    /// Creates a new application state from the given configuration, templates, and backend client.
    pub fn new(config: AppConfig, tera: Tera, backend: BackendClient) -> Self {
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            backend,
        }
    }
}
