//! Framecap CLI - caption video frames with a hosted multimodal model.
//!
//! # Usage
//!
//! ```bash
//! # Caption one frame
//! framecap caption --image frame.jpg --description "A cat jumps"
//!
//! # Run every sample in the manifest
//! framecap samples
//!
//! # Serve the HTTP handler
//! framecap serve --port 8080
//!
//! # View configuration
//! framecap config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Framecap - caption video frames with a hosted multimodal model.
#[derive(Parser, Debug)]
#[command(name = "framecap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a caption for a single frame
    Caption(cli::caption::CaptionArgs),

    /// Caption every sample listed in the samples manifest
    Samples(cli::samples::SamplesArgs),

    /// Serve the captioning handler over HTTP
    Serve(cli::serve::ServeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match framecap_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `framecap config path`."
            );
            framecap_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Framecap v{}", framecap_core::VERSION);

    match cli.command {
        Commands::Caption(args) => cli::caption::execute(args, config).await,
        Commands::Samples(args) => cli::samples::execute(args, config).await,
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
