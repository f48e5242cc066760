//! `malta dev` and `malta preview` command implementation.

use std::path::PathBuf;

use clap::Args;
use malta_config::{CliSettings, Config};
use malta_server::{ServeMode, run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by the dev and preview commands.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: ./malta.config.json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (default: 3000).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the dev or preview command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, mode: ServeMode) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        tracing::debug!(config = %config.config_path.display(), "Loaded configuration");

        match mode {
            ServeMode::Dev => output.field("Pages", config.paths.pages_dir.display()),
            ServeMode::Preview => output.field("Serving", config.paths.output_dir.display()),
        }
        output.listening(&config.server.host, config.server.port);

        run_server(server_config_from_config(&config, mode))
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    }
}
