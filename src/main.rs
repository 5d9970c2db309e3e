//! Pennant: a blue-green deployment verification page.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file, initializes tracing, creates the backend health client, sets up the
//! Axum router with all routes, and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pennant::backend::BackendClient;
use pennant::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use pennant::http::start_server;
use pennant::routes::create_router;
use pennant::state::AppState;
use pennant::templates::init_templates;

/// Pennant: A web page for verifying blue-green deployments
#[derive(Parser, Debug)]
#[command(name = "pennant", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "pennant=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Backend base URL, overriding the config file
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration, applying CLI overrides before validating again
    let mut config = AppConfig::load(&args.config)?;
    if let Some(backend_url) = args.backend_url {
        config.backend.base_url = backend_url;
        config.validate()?;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Loaded configuration");
    tracing::info!(
        base_url = %config.backend.base_url,
        health_url = %config.backend.health_url(),
        "Backend configured"
    );

    // Initialize Tera templates
    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // Create the backend health client
    let backend = BackendClient::new(&config.backend)?;

    // Create application state
    let state = AppState::new(config.clone(), tera, backend);

    // Create router
    let app = create_router(state);

    // Start server
    start_server(app, &config).await?;

    Ok(())
}
