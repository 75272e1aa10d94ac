//! Command-line flags. Anything given here overrides the config file.

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a config.toml to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// News endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Client-side request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Topic offered in the checklist (repeatable; replaces the configured list)
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ref endpoint) = self.endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.api.timeout_ms = timeout_ms;
        }
        if !self.topics.is_empty() {
            config.topics.available = self.topics.clone();
        }
    }
}
