//! HTTP server module.
//!
//! Binds the configured listen address and serves the router until a
//! shutdown signal arrives. TLS is left to the reverse proxy in front of
//! the demo.
//!
//! The server includes:
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::start_server;
