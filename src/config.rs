//! Library configuration.
//!
//! This module handles loading the client configuration from the environment:
//! the API base URL, the request timeout, and an optional override for the
//! directory holding persisted auth state.
//!
//! A `.env` file is honored when present so local setups match deployed ones.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

/// Application name used for the data directory path
const APP_NAME: &str = "authkit";

/// Default API base URL when `API_BASE_URL` is unset
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout in milliseconds.
/// 10s allows for slow API responses while failing fast enough for good UX.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout: Duration,
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Reads `API_BASE_URL`, `API_TIMEOUT_MS`, and `AUTH_DATA_DIR`. Missing or
    /// malformed values fall back to defaults rather than failing startup.
    pub fn load() -> Result<Self> {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = match std::env::var("API_BASE_URL") {
            Ok(url) if Self::is_valid_base_url(&url) => url,
            Ok(url) => {
                warn!(url = %url, "Invalid API_BASE_URL, using default");
                DEFAULT_API_BASE_URL.to_string()
            }
            Err(_) => DEFAULT_API_BASE_URL.to_string(),
        };

        let timeout_ms = std::env::var("API_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let data_dir = std::env::var("AUTH_DATA_DIR").ok().map(PathBuf::from);

        Ok(Self {
            api_base_url,
            timeout: Duration::from_millis(timeout_ms),
            data_dir,
        })
    }

    /// Minimal sanity check on the base URL scheme.
    fn is_valid_base_url(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    /// Build a full endpoint URL from a path, normalizing the leading slash.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Directory for persisted auth state (`auth.json`).
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let config = Config {
            api_base_url: "https://api.example.com/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.endpoint("/auth/login"),
            "https://api.example.com/auth/login"
        );
        assert_eq!(
            config.endpoint("auth/login"),
            "https://api.example.com/auth/login"
        );
    }

    #[test]
    fn base_url_validation() {
        assert!(Config::is_valid_base_url("http://localhost:3000/api"));
        assert!(Config::is_valid_base_url("https://api.example.com"));
        assert!(!Config::is_valid_base_url("ftp://example.com"));
        assert!(!Config::is_valid_base_url("localhost:3000"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/authkit-test")),
            ..Config::default()
        };
        assert_eq!(
            config.data_dir().unwrap(),
            PathBuf::from("/tmp/authkit-test")
        );
    }
}
