//! Malta CLI - static documentation site generator.
//!
//! Provides commands for:
//! - `build`: Render `pages/` into a static site
//! - `dev`: Serve pages rendered on request
//! - `preview`: Serve the built site

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use malta_server::ServeMode;
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ServeArgs};
use output::Output;

/// Malta - static documentation site generator.
#[derive(Parser)]
#[command(name = "malta", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the output directory.
    Build(BuildArgs),
    /// Start the dev server, rendering pages on every request.
    Dev(ServeArgs),
    /// Serve the built site.
    Preview(ServeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.verbose,
            Self::Dev(args) | Self::Preview(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Dev(args) => serve(args, ServeMode::Dev),
        Commands::Preview(args) => serve(args, ServeMode::Preview),
    };

    if let Err(err) = result {
        output.error(&err.to_string());
        std::process::exit(1);
    }
}

fn serve(args: ServeArgs, mode: ServeMode) -> Result<(), error::CliError> {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(args.execute(mode))
}
