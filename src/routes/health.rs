//! Health check endpoint for container orchestration.
//!
//! This is the liveness probe of the verification page itself, distinct from
//! the backend health it relays. Returns 200 OK when the process is running;
//! used by Kubernetes, ECS, systemd, and load balancers.

/// Health check handler.
///
/// Returns a simple "ok" response to indicate the service is running.
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> &'static str {
    "ok"
}
