//! `malta build` command implementation.

use std::path::PathBuf;

use clap::Args;
use malta_config::{CliSettings, Config};
use malta_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: ./malta.config.json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (default: dist/ next to the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        tracing::debug!(config = %config.config_path.display(), "Loaded configuration");

        output.field("Pages", config.paths.pages_dir.display());
        output.field("Output", config.paths.output_dir.display());

        let stats = SiteBuilder::new(config).build()?;

        output.success(&format!(
            "Built {} pages and {} assets into {}",
            stats.pages,
            stats.assets,
            stats.output_dir.display()
        ));
        Ok(())
    }
}
