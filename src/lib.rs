pub mod cli;
pub mod core;
pub mod ingest;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Status,
    Tables,
    Quote(cli::quote::QuoteRequest),
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Edit quote starting...");

    let config = match config_path {
        Some(path) => crate::core::config::AppConfig::load_from_path(path)?,
        None => crate::core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::SheetProvider::new(config.retrieval.clone())?;

    match command {
        AppCommand::Status => cli::status::run(&provider, &config).await,
        AppCommand::Tables => cli::tables::run(&provider, &config).await,
        AppCommand::Quote(request) => cli::quote::run(&provider, &config, &request).await,
    }
}
