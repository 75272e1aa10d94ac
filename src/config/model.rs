//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::news::client::{ClientSettings, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::news::Topic;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub topics: TopicsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how long to ask the news backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Client-side timeout in milliseconds. Keep it above the server's own
    /// 60 s limit.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

/// The topic catalog offered in the checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicsConfig {
    #[serde(default = "default_topics")]
    pub available: Vec<String>,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            available: default_topics(),
        }
    }
}

impl TopicsConfig {
    /// Catalog as topics, with blanks and duplicates dropped.
    pub fn catalog(&self) -> Vec<Topic> {
        let mut out: Vec<Topic> = Vec::new();
        for name in &self.available {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let topic = Topic::new(name);
            if !out.contains(&topic) {
                out.push(topic);
            }
        }
        out
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Show each item's snippet under its title instead of only in the
    /// detail modal.
    #[serde(default)]
    pub show_snippets: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_snippets: false,
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}
fn default_topics() -> Vec<String> {
    vec!["Tech".into(), "Crypto".into(), "Space".into()]
}
fn default_tick_rate_ms() -> u64 {
    250
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whatsnew")
        .join("logs")
}
