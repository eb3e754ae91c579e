//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::store::STORE_NAME;

/// Prefix for every feed path when a feed is opened.
pub const DEFAULT_BASE_URL: &str = "http://rss.cnn.com/rss/";

const APP_DIR: &str = "favorite-feeds";

#[derive(Parser, Debug)]
#[command(author, version, about = "Keep a list of tagged feed bookmarks and open them in the browser")]
pub struct Config {
    /// Base URL that feed paths are appended to
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Store file (defaults to the platform data directory)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Log file (defaults next to the store; RUST_LOG sets the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Keep feeds in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,
}

impl Config {
    pub fn store_path(&self) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| app_dir().join(format!("{STORE_NAME}.json")))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| app_dir().join(format!("{APP_DIR}.log")))
    }
}

fn app_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
