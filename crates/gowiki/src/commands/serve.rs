//! `gowiki serve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use gowiki_config::{CliSettings, Config};
use gowiki_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover gowiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "GOWIKI_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "GOWIKI_PORT")]
    port: Option<u16>,

    /// Directory holding page files (overrides config).
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Directory with view.html and edit.html (overrides config).
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Enable verbose output (log every request phase).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            pages_dir: self.pages_dir,
            templates_dir: self.templates_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Loaded configuration");

        ensure_pages_dir(&config.pages_resolved.dir)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Pages directory: {}",
            config.pages_resolved.dir.display()
        ));
        match &config.templates_dir {
            Some(dir) => output.info(&format!("Templates: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }
        output.highlight(&format!(
            "Front page: http://{}:{}/view/{}",
            config.server.host, config.server.port, config.pages_resolved.front_page
        ));

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Ensure the page directory exists so the first save can succeed.
fn ensure_pages_dir(pages_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(pages_dir).map_err(|e| {
        CliError::Server(format!(
            "Failed to create pages directory {}: {e}",
            pages_dir.display()
        ))
    })
}
