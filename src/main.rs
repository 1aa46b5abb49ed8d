//! Pulseboard - Business analytics dashboard backend

use anyhow::Result;
use clap::{Parser, Subcommand};
use pulseboard::config::PulseboardConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version)]
#[command(about = "Business analytics dashboard backend")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PULSEBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pulseboard={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        PulseboardConfig::load(config_path)?
    } else {
        PulseboardConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            pulseboard::server::run(config).await?;
        }
        Commands::Config { default } => {
            let config = if default {
                PulseboardConfig::default()
            } else {
                config
            };
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
