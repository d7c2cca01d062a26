// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::dashboard::SuffixTable;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub health: HealthConfig,
    pub dashboard: DashboardConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `debug` also logs missing fragments and per-page summaries
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// `Cache-Control: max-age` for dashboard pages; 0 sends `no-cache`
    pub cache_max_age: u32,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Directory holding the pipeline's pre-rendered fragments
    pub fragment_dir: String,
    /// Path whose mtime is shown as "Data Last Updated"
    pub data_source: String,
    /// Location shown when the request names none
    pub default_location: String,
    /// Placeholder text for slots whose fragment is missing
    pub unavailable_text: String,
    /// Page templates; the built-in county/state/table set when empty
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

/// One `[[dashboard.pages]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    pub name: String,
    pub path: String,
    #[serde(default = "default_page_title")]
    pub title: String,
    /// Slot names in display order: new_cases, trend, target, posneg, table
    pub slots: Vec<String>,
    #[serde(default)]
    pub suffixes: SuffixTable,
    /// Overrides `dashboard.data_source` for this page
    #[serde(default)]
    pub data_source: Option<String>,
    /// Trusted HTML shown under the page
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default = "default_page_columns")]
    pub columns: usize,
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_title() -> String {
    "SARS-CoV-2: {location}".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_columns() -> usize {
    2
}
