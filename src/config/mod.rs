// Configuration module entry point
// Loads application configuration and builds the shared request state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HealthConfig, PageConfig};

/// Location shown when a request names none
pub const DEFAULT_LOCATION: &str = "Delaware_County_Pennsylvania";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, Self::environment())
    }

    /// Overrides such as `DASHBOARD_SERVER__PORT=9090`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("DASHBOARD")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with_env(
        config_path: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment)
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "covid-dashboard")?
            .set_default("http.enable_cors", false)?
            .set_default("http.cache_max_age", 300)?
            .set_default("dashboard.fragment_dir", "fragments")?
            .set_default("dashboard.data_source", "data/csse_covid_19_daily_reports")?
            .set_default("dashboard.default_location", DEFAULT_LOCATION)?
            .set_default("dashboard.unavailable_text", "data not available")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
