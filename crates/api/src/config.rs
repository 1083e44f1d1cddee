//! # API Configuration Module
//!
//! Loads the Jamroom server configuration from environment variables, with
//! defaults for everything except the database URL.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `STORAGE_OFFSET_MINUTES`: Shift applied to approved request times (default: 330)
//! - `SLOT_CACHE_TTL_SECONDS`: Lifetime of cached slot ranges (default: 30)

use std::{env, time::Duration};

use eyre::{Result, WrapErr};
use jamroom_core::offset::{StorageOffset, DEFAULT_STORAGE_OFFSET_MINUTES};
use tracing::Level;

/// A display offset never spans more than a day.
const MAX_STORAGE_OFFSET_MINUTES: i64 = 24 * 60;

/// Configuration for the Jamroom API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use jamroom_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Minutes added to display wall-clock times when a request is approved
    pub storage_offset_minutes: i64,

    /// How long a fetched slot range stays cached
    pub slot_cache_ttl_seconds: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    /// - The STORAGE_OFFSET_MINUTES value is not an integer or exceeds a day
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Booking settings
        let storage_offset_minutes = match lookup("STORAGE_OFFSET_MINUTES") {
            Some(value) => value
                .trim()
                .parse()
                .wrap_err("Invalid STORAGE_OFFSET_MINUTES value")?,
            None => DEFAULT_STORAGE_OFFSET_MINUTES,
        };
        let offset_bounds = -MAX_STORAGE_OFFSET_MINUTES..=MAX_STORAGE_OFFSET_MINUTES;
        if !offset_bounds.contains(&storage_offset_minutes) {
            eyre::bail!(
                "STORAGE_OFFSET_MINUTES must be within ±{} minutes, got {}",
                MAX_STORAGE_OFFSET_MINUTES,
                storage_offset_minutes
            );
        }
        let slot_cache_ttl_seconds = lookup("SLOT_CACHE_TTL_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            storage_offset_minutes,
            slot_cache_ttl_seconds,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn storage_offset(&self) -> StorageOffset {
        StorageOffset::from_minutes(self.storage_offset_minutes)
    }

    pub fn slot_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.slot_cache_ttl_seconds)
    }
}
