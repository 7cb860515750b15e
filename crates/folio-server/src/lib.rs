//! HTTP server for Folio.
//!
//! Serves JSON API endpoints backed by a remote document source:
//! - `GET /api/pages/{slug}`: rendered document `{text, matter}`
//! - `GET /api/layout/{slug}`: site settings plus breadcrumbs
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         base_url: "https://raw.githubusercontent.com/owner/blog/main".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (folio-server)
//!                        │
//!                        └─► Site ──► HttpSource ──HTTP──► content origin
//!                              │
//!                              └─► DocumentPipeline (folio-renderer)
//! ```

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use folio_renderer::{DocumentPipeline, Highlighter};
use folio_site::{HttpSource, Site};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root URL of the content origin.
    pub base_url: String,
    /// Global request timeout for fetches (`None` disables it).
    pub timeout: Option<Duration>,
    /// Enable GFM extensions.
    pub gfm: bool,
    /// Directory with extra `.sublime-syntax` grammars.
    pub syntaxes_dir: Option<PathBuf>,
    /// Application version, mixed into page `ETag`s.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            base_url: folio_config::DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            gfm: true,
            syntaxes_dir: None,
            version: String::new(),
        }
    }
}

/// Build the site loader described by `config`.
#[must_use]
pub fn site_from_config(config: &ServerConfig) -> Site {
    let source = Arc::new(HttpSource::new(&config.base_url, config.timeout));
    let highlighter = match &config.syntaxes_dir {
        Some(dir) => Highlighter::with_syntaxes_dir(dir),
        None => Highlighter::new(),
    };
    let pipeline = DocumentPipeline::new(Arc::new(highlighter)).with_gfm(config.gfm);
    Site::new(source, pipeline)
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState {
        site: site_from_config(&config),
        version: config.version.clone(),
    });

    // Load grammars before the first request needs them.
    let highlighter = Arc::clone(state.site.pipeline().highlighter());
    tokio::spawn(async move {
        if let Err(e) = highlighter.registry().await {
            tracing::warn!(error = %e, "Failed to preload grammars");
        }
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, base_url = %config.base_url, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        base_url: config.source.base_url.clone(),
        timeout: config.source.timeout(),
        gfm: config.markdown.gfm,
        syntaxes_dir: config.highlight_resolved.syntaxes_dir.clone(),
        version,
    }
}
