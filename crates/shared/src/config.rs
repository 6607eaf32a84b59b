//! Application configuration management.
//!
//! Configuration is layered: `config/default`, then `config/{RUN_MODE}`, then
//! environment variables prefixed with `TALLYBOOK__` (for example
//! `TALLYBOOK__DATABASE__URL`).

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Accounting behaviour.
    #[serde(default)]
    pub accounting: AccountingConfig,
    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Accounting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// First day of the financial year as `MM-DD`.
    #[serde(default = "default_first_day")]
    pub first_day_of_financial_year: String,
    /// When false, automatic postings from payment reconciliation are skipped.
    #[serde(default = "default_true")]
    pub enable_auto_accounting: bool,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            first_day_of_financial_year: default_first_day(),
            enable_auto_accounting: default_true(),
        }
    }
}

fn default_first_day() -> String {
    "01-01".to_string()
}

const fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "tallybook=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLYBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
