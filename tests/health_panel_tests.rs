//! End-to-end tests over real HTTP.
//!
//! Each test starts the application on an ephemeral port, pointed at a stub
//! backend (also on an ephemeral port), and drives it with reqwest. The stub
//! backend stands in for the external service the page reports on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use pennant::backend::BackendClient;
use pennant::config::{AppConfig, BackendConfig, HttpServerConfig, LoggingConfig, UiConfig};
use pennant::routes::create_router;
use pennant::state::AppState;
use pennant::templates::init_templates;

/// The documented backend response body.
fn healthy_body() -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "database": "connected",
        "version": "1.2.3",
        "timestamp": "2024-01-01T00:00:00Z"
    })
}

/// Build an application config pointed at the given backend.
fn test_config(backend_base_url: &str) -> AppConfig {
    AppConfig {
        http: HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        backend: BackendConfig {
            base_url: backend_base_url.to_string(),
            health_path: "/health".to_string(),
        },
        ui: UiConfig {
            site_name: "Blue-Green Deployment Demo".to_string(),
            badge_label: "Version 1.0 - BLUE".to_string(),
            badge_color: "blue".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        logging: LoggingConfig::default(),
    }
}

/// Serve a router on an ephemeral port and return its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{}", addr)
}

/// Start the application pointed at the given backend base URL.
async fn spawn_app(backend_base_url: &str) -> String {
    let config = test_config(backend_base_url);
    let tera = init_templates().expect("templates load from the crate root");
    let backend = BackendClient::new(&config.backend).expect("backend client");
    let state = AppState::new(config, tera, backend);
    spawn(create_router(state)).await
}

/// Start a stub backend whose /health always answers with the given response.
async fn spawn_backend<R>(response: R) -> String
where
    R: Fn() -> axum::response::Response + Clone + Send + Sync + 'static,
{
    let router = Router::new().route(
        "/health",
        get(move || {
            let response = response.clone();
            async move { response() }
        }),
    );
    spawn(router).await
}

/// An address nothing is listening on.
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn proxy_relays_a_healthy_report_verbatim() {
    let backend = spawn_backend(|| Json(healthy_body()).into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, healthy_body());
}

#[tokio::test]
async fn backend_error_status_collapses_to_bad_gateway() {
    let backend = spawn_backend(|| {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(healthy_body())).into_response()
    })
    .await;
    let app = spawn_app(&backend).await;

    // The body is well-formed, but the status alone makes this a failure.
    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 502);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "backend unreachable");
}

#[tokio::test]
async fn malformed_body_collapses_to_bad_gateway() {
    let backend = spawn_backend(|| "this is not json".into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn partial_body_collapses_to_bad_gateway() {
    // A report missing a field is no report at all.
    let backend =
        spawn_backend(|| Json(serde_json::json!({ "status": "ok" })).into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn unreachable_backend_collapses_to_bad_gateway() {
    let app = spawn_app(&unreachable_base_url()).await;

    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn one_proxy_hit_is_one_backend_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counted = hits.clone();
    let backend = spawn_backend(move || {
        counted.fetch_add(1, Ordering::SeqCst);
        Json(healthy_body()).into_response()
    })
    .await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // A second page load probes again; no caching of the result.
    reqwest::get(format!("{}/api/health", app)).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn page_renders_badge_and_loading_panel() {
    let backend = spawn_backend(|| Json(healthy_body()).into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/", app)).await.unwrap();
    assert_eq!(response.status(), 200);

    let html = response.text().await.unwrap();
    assert!(html.contains("Version 1.0 - BLUE"));
    assert!(html.contains("badge-blue"));
    assert!(html.contains("Backend Health Status"));
    // The server renders the loading state; terminal states are reached by the page script.
    assert!(html.contains("Checking backend..."));
    assert!(!html.contains("Backend Connected"));
    assert!(!html.contains("Backend Unavailable"));
    assert!(html.contains("/static/js/health.js"));
    assert!(html.contains("Change the version badge color to verify deployments"));
}

#[tokio::test]
async fn badge_is_static_regardless_of_backend_state() {
    let healthy = spawn_backend(|| Json(healthy_body()).into_response()).await;
    let healthy_app = spawn_app(&healthy).await;
    let dead_app = spawn_app(&unreachable_base_url()).await;

    let with_backend = reqwest::get(format!("{}/", healthy_app))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let without_backend = reqwest::get(format!("{}/", dead_app))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    for html in [&with_backend, &without_backend] {
        assert!(html.contains("Version 1.0 - BLUE"));
        assert!(html.contains("badge-blue"));
    }
    // The page itself is identical either way; only the script's fetch differs.
    assert_eq!(with_backend, without_backend);
}

#[tokio::test]
async fn liveness_probe_returns_ok() {
    let backend = spawn_backend(|| Json(healthy_body()).into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/health", app)).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn static_assets_are_served_with_long_cache() {
    let backend = spawn_backend(|| Json(healthy_body()).into_response()).await;
    let app = spawn_app(&backend).await;

    let response = reqwest::get(format!("{}/static/js/health.js", app))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let cache = response
        .headers()
        .get("cache-control")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cache.contains("immutable"));

    let script = response.text().await.unwrap();
    assert!(script.contains("fetch('/api/health')"));
}
