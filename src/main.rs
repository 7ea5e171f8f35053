use anyhow::{Context, Result};
use app_state::SessionStore;
use app_ui::{App, Notice};
use clap::Parser;
use fitcheck_client::FitCheckClient;
use std::sync::Arc;
use storage::{KvConfig, KvStore};

mod cli;
mod commands;
mod config;
mod logging;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logger();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "starting");

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;

    let kv = KvStore::new(KvConfig::new(config.store_path()))
        .context("Failed to open the session store")?;
    let client = FitCheckClient::new(config.client_config()).context("Failed to build HTTP client")?;

    let app = App::new(Arc::new(client), SessionStore::new(kv));
    app.boot();

    let outcome = commands::run(&app, cli.command).await;

    let notices = app.take_notices();
    for notice in &notices {
        eprintln!("{}", notice);
    }

    if let Err(err) = outcome {
        if notices.is_empty() {
            eprintln!("{}", Notice::from(&err));
        }
        std::process::exit(1);
    }

    Ok(())
}
