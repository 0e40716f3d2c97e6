//! Application configuration

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening host
    pub host: String,
    /// API port
    pub port: u16,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Socket address to listen on
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
