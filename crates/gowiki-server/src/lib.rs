//! HTTP server for gowiki.
//!
//! This crate provides a native Rust HTTP server using axum, serving three
//! page operations over a [`Storage`] backend:
//!
//! - `GET /view/<title>` - render a page, or redirect to the editor if it doesn't exist
//! - `GET /edit/<title>` - render the edit form (empty for new pages)
//! - `POST /save/<title>` - store the submitted `body` field and redirect to the view
//!
//! Titles are ASCII letters and digits only; any other path is a 404.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use gowiki_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         pages_dir: PathBuf::from("data"),
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
//! Browser ──HTTP──► axum router (gowiki-server)
//!                        │
//!                        ├─► Title<Op> extractor ──► 404 on invalid path
//!                        │
//!                        ├─► view / edit / save handlers
//!                        │       │
//!                        │       ├─► Storage (FsStorage: <title>.txt)
//!                        │       │
//!                        │       └─► Templates (minijinja, parsed at startup)
//!                        │
//!                        └─► fallback ──► 404
//! ```

mod app;
mod dispatch;
mod error;
mod handlers;
mod middleware;
mod routing;
mod state;
mod templates;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use gowiki_storage::Storage;
use gowiki_storage_fs::FsStorage;
use state::AppState;

pub use routing::{Operation, title_for};
pub use templates::{TemplateError, Templates};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `<title>.txt` page files.
    pub pages_dir: PathBuf,
    /// Directory with `view.html` and `edit.html` (`None` uses built-in templates).
    pub templates_dir: Option<PathBuf>,
    /// Title that `/` redirects to.
    pub front_page: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            pages_dir: PathBuf::from("."),
            templates_dir: None,
            front_page: "FrontPage".to_owned(),
        }
    }
}

/// Build the wiki router over an arbitrary page store.
#[must_use]
pub fn router(storage: Arc<dyn Storage>, templates: Templates, front_page: &str) -> Router {
    app::create_router(Arc::new(AppState {
        storage,
        templates,
        front_page: front_page.to_owned(),
    }))
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if templates fail to load or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.pages_dir.clone()));

    // Parsed once; handlers only read them
    let templates = Templates::load(config.templates_dir.as_deref())?;

    let app = router(storage, templates, &config.front_page);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        pages_dir = %config.pages_dir.display(),
        "Starting server"
    );

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

/// Create server configuration from gowiki config.
#[must_use]
pub fn server_config_from_config(config: &gowiki_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_dir: config.pages_resolved.dir.clone(),
        templates_dir: config.templates_dir.clone(),
        front_page: config.pages_resolved.front_page.clone(),
    }
}
