//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the BookSlot
//! API server. It retrieves configuration values from environment variables
//! and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `BUSINESS_NAME`: Name used in notification emails
//! - `ADMIN_EMAIL`: Address receiving new-booking notifications

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the BookSlot API server.
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

    /// Business name used in notification emails
    pub business_name: String,

    /// Address receiving admin notifications (optional; none disables them)
    pub admin_email: Option<String>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set, or if `API_PORT` or
    /// `API_REQUEST_TIMEOUT_SECONDS` cannot be parsed as numbers.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?;

        // Notification settings
        let business_name =
            env::var("BUSINESS_NAME").unwrap_or_else(|_| "Salon Elegance".to_string());
        let admin_email = env::var("ADMIN_EMAIL").ok();

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            business_name,
            admin_email,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    /// Defaults used by tests; production always goes through [`Self::from_env`].
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: String::new(),
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            business_name: "Salon Elegance".to_string(),
            admin_email: Some("admin@example.com".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timeout_fails_loudly() {
        unsafe {
            env::set_var("DATABASE_URL", "postgres://localhost/bookslot_test");
            env::set_var("API_REQUEST_TIMEOUT_SECONDS", "soon");
        }

        let result = ApiConfig::from_env();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API_REQUEST_TIMEOUT_SECONDS"));

        unsafe {
            env::remove_var("API_REQUEST_TIMEOUT_SECONDS");
        }
    }
}
