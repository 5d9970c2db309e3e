//! Backend health probe client.
//!
//! Wraps a reqwest client pointed at the configured backend health endpoint.
//! A probe either yields a fully-populated [`HealthReport`] or a
//! [`BackendError`]; there is no partial result. The error kinds are kept
//! distinct so logs can tell a dead backend from a misbehaving one, but every
//! kind renders as the same "unavailable" outcome.

use serde::{Deserialize, Serialize};

use crate::config::BackendConfig;

/// The backend's self-reported status.
///
/// All four fields are free-form text whose meaning is defined entirely by
/// the backend; the page renders them verbatim. A body missing any field
/// fails to parse and the report is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database: String,
    pub version: String,
    pub timestamp: String,
}

/// Why a health probe failed.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, refused, reset).
    #[error("backend request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {0}")]
    Status(http::StatusCode),

    /// The backend answered 2xx but the body is not a health report.
    #[error("backend returned an unreadable health report: {0}")]
    Parse(#[source] reqwest::Error),
}

/// HTTP client for the backend health endpoint.
///
/// Constructed once at startup from [`BackendConfig`] and shared by all
/// requests. No timeout is configured: a probe that never resolves leaves
/// the caller waiting, matching the page's single-shot semantics.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    health_url: String,
}

impl BackendClient {
    /// Create a client for the configured backend.
    pub fn new(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            health_url: config.health_url(),
        })
    }

    /// The URL probed by [`BackendClient::check_health`].
    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// Issue one GET to the backend health endpoint.
    ///
    /// Exactly one outbound request per call. Transport failures, non-2xx
    /// statuses, and unparseable bodies each map to their own error kind.
    pub async fn check_health(&self) -> Result<HealthReport, BackendError> {
        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(BackendError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        response
            .json::<HealthReport>()
            .await
            .map_err(BackendError::Parse)
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("health_url", &self.health_url)
            .finish_non_exhaustive()
    }
}
