use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fitcheck")]
#[command(about = "FitCheck wardrobe and outfit assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "FITCHECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the local session store
    #[arg(long, env = "FITCHECK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "FITCHECK_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in to an existing account
    Login {
        /// Account name
        username: String,
        /// Account password
        #[arg(long, env = "FITCHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        /// Account name
        username: String,
        /// Account password
        #[arg(long, env = "FITCHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// List wardrobe items
    Items,
    /// Show one wardrobe item
    Show {
        /// Image URL identifying the item
        image_url: String,
    },
    /// Upload a garment photo
    Add {
        /// Photo file
        photo: PathBuf,
        /// Suggested name
        #[arg(long)]
        name: Option<String>,
        /// Intended wearer
        #[arg(long)]
        gender: Option<String>,
    },
    /// Delete a wardrobe item
    Delete {
        /// Image URL identifying the item
        image_url: String,
    },
    /// Generate an outfit
    Recommend {
        /// Occasion or requirements
        #[arg(long)]
        prompt: String,
        /// New base item photo (also saved to the wardrobe)
        #[arg(long, conflicts_with = "base")]
        photo: Option<PathBuf>,
        /// Image URL of a wardrobe item to build around
        #[arg(long)]
        base: Option<String>,
        /// Latitude for weather
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude for weather
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },
}
