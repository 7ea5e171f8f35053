use anyhow::{anyhow, Result};
use fitcheck_client::http::DEFAULT_BASE_URL;
use fitcheck_client::ClientConfig;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Command line and environment first, then built-in defaults
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("fitcheck"))
                .ok_or_else(|| anyhow!("Could not find a data directory; pass --data-dir"))?,
        };

        Ok(Self {
            api_url: cli
                .api_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            data_dir,
            timeout: Duration::from_secs(cli.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_timeout(self.timeout)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("session")
    }
}
