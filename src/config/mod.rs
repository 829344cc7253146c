use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::load_config;
pub use validator::validate_config;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where and how to reach the screening backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound for one request/response cycle, connect included.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Initial values of the screening form's numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningDefaults {
    pub max_results: i64,
    pub max_stocks_to_analyze: i64,
}

impl Default for ScreeningDefaults {
    fn default() -> Self {
        Self {
            max_results: 10,
            max_stocks_to_analyze: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a transient warning stays on screen.
    pub warning_secs: u64,
    pub tick_millis: u64,
    /// Log destination while the dashboard owns the terminal.
    pub log_file: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            warning_secs: 5,
            tick_millis: 150,
            log_file: PathBuf::from("screener.log"),
        }
    }
}

impl UiConfig {
    pub fn warning_window(&self) -> Duration {
        Duration::from_secs(self.warning_secs)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub screening: ScreeningDefaults,
    pub ui: UiConfig,
}

impl Config {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }
}
