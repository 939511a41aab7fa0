//! API endpoint configuration.
//!
//! Resolved once at startup from the environment, with a localhost default
//! for local development against a dev backend.

use std::time::Duration;

/// Fixed per-request transport timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved API endpoint configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base address every request path is joined onto (no trailing slash).
    pub base_url: String,
    /// Per-request timeout applied to the whole transfer.
    pub timeout: Duration,
    /// Keyring service name for persisted credentials.
    pub keyring_service: String,
}

impl ApiConfig {
    /// Build a config with an explicit base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
            keyring_service: "com.meridian.client".to_string(),
        }
    }

    /// Resolve from the environment: `MERIDIAN_API_URL` > `API_BASE_URL` >
    /// localhost default. Loads `.env` first so both variables can live there.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let base_url = std::env::var("MERIDIAN_API_URL")
            .or_else(|_| std::env::var("API_BASE_URL"))
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());

        Self::new(&base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = ApiConfig::new("https://api.meridian.example/api/");
        assert_eq!(config.base_url, "https://api.meridian.example/api");
    }
}
