//! Dev and preview HTTP server for Malta sites.
//!
//! Two modes share one router:
//!
//! - **Dev**: renders `pages/**/*.md` on every request. Config, assets and
//!   navigation are reloaded from disk each time, so edits show up on refresh.
//! - **Preview**: serves the built output directory as is.
//!
//! # Quick Start
//!
//! ```ignore
//! use malta_config::Config;
//! use malta_server::{ServeMode, run_server, server_config_from_config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, None).unwrap();
//!     run_server(server_config_from_config(&config, ServeMode::Dev)).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub use error::ServerError;
use state::AppState;

/// What the server serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServeMode {
    /// Render Markdown sources on request.
    Dev,
    /// Serve the built site.
    Preview,
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    pub mode: ServeMode,
    /// Config file, reloaded per request in dev mode.
    pub config_path: PathBuf,
    /// Built site served in preview mode.
    pub output_dir: PathBuf,
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener can't bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;

    let state = Arc::new(AppState {
        mode: config.mode,
        config_path: config.config_path,
        output_dir: config.output_dir,
        port: config.port,
    });
    let app = app::create_router(state);

    tracing::info!(address = %addr, mode = ?config.mode, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the site config.
#[must_use]
pub fn server_config_from_config(config: &malta_config::Config, mode: ServeMode) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        mode,
        config_path: config.config_path.clone(),
        output_dir: config.paths.output_dir.clone(),
    }
}
