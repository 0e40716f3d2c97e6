//! Configuration for the price sync service

use std::env;

use tracing::warn;

/// Default base URL of the iTick quote API
pub const DEFAULT_ITICK_BASE_URL: &str = "https://api.itick.org";

/// Configuration for the price sync service
#[derive(Debug, Clone)]
pub struct PriceSyncConfig {
    /// Token sent to the quote provider
    pub itick_api_key: String,
    /// Quote provider base URL
    pub itick_base_url: String,
    /// Supabase project URL
    pub supabase_url: String,
    /// Supabase service role key
    pub supabase_service_role_key: String,
    /// Direct Postgres connection; takes precedence over the REST API when set
    pub database_url: Option<String>,
    /// Database connection pool size
    pub db_pool_size: u32,
}

impl Default for PriceSyncConfig {
    fn default() -> Self {
        Self {
            itick_api_key: env_or_empty("ITICK_API_KEY"),
            itick_base_url: env::var("ITICK_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ITICK_BASE_URL.to_string()),
            supabase_url: env_or_empty("SUPABASE_URL"),
            supabase_service_role_key: env_or_empty("SUPABASE_SERVICE_ROLE_KEY"),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }
}

impl PriceSyncConfig {
    /// Create a new configuration using environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create a new configuration with custom values
    pub fn new(
        itick_api_key: impl Into<String>,
        supabase_url: impl Into<String>,
        supabase_service_role_key: impl Into<String>,
    ) -> Self {
        Self {
            itick_api_key: itick_api_key.into(),
            itick_base_url: DEFAULT_ITICK_BASE_URL.to_string(),
            supabase_url: supabase_url.into(),
            supabase_service_role_key: supabase_service_role_key.into(),
            database_url: None,
            db_pool_size: 5,
        }
    }

    /// Override the quote provider base URL
    pub fn with_itick_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.itick_base_url = base_url.into();
        self
    }

    /// Connect to Postgres directly instead of through the REST API
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }
}

// Missing values are not fatal here; they fail at the first outbound call.
fn env_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        warn!("{} is not set", key);
        String::new()
    })
}
