//! Tavle CLI entry point.

use anyhow::Result;
use clap::Parser;
use tavle::cli::commands::{self, ProcessOptions};
use tavle::cli::{Cli, Commands};
use tavle::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tavle={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config_path = cli.config.as_ref().map(std::path::PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Execute command
    match cli.command {
        Commands::Process {
            files,
            keyword,
            category,
            export,
            sync_notion,
            notion_token,
            notion_db,
            backup_dropbox,
            dropbox_token,
        } => {
            let opts = ProcessOptions {
                keyword,
                category,
                export,
                sync_notion,
                notion_token,
                notion_db,
                backup_dropbox,
                dropbox_token,
            };
            commands::run_process(&files, opts, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path.as_deref())?;
        }
    }

    Ok(())
}
