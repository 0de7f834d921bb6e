//! The `framecap config` command for configuration management.

use clap::{Args, Subcommand};
use framecap_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Show where prompts and samples are looked up
    Layout,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Layout => {
            let config = Config::load()?;
            println!("root:     {}", config.project_root().display());
            println!("prompt:   {}", config.prompt_path().display());
            println!("samples:  {}", config.samples_dir().display());
            println!(
                "manifest: {}",
                config
                    .samples_dir()
                    .join(&config.layout.manifest_file)
                    .display()
            );
            println!("backend:  {} ({})", config.backend.kind, config.model.region);
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            // Check if config already exists
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            // Ensure parent directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // Write default config
            std::fs::write(&path, Config::default().to_toml()?)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
