//! Durable token storage.
//!
//! Persists the token pair, its expiry, and a cached user profile to
//! `auth.json` in the data directory. The serialized keys (`access_token`,
//! `refresh_token`, `token_expires_at`, `user_data`) are stable across
//! versions; older installs must keep deserializing.
//!
//! Every operation degrades instead of failing: an unreadable or corrupt
//! store behaves as if nothing was ever persisted. The store is the only
//! writer of this file; concurrent processes sharing it may race on refresh,
//! which is an accepted limitation.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::UserProfile;

/// Auth state file name in the data directory
const AUTH_FILE: &str = "auth.json";

/// Safety margin before the recorded expiry, in milliseconds.
/// Callers refresh proactively instead of letting the access token die
/// mid-request.
const EXPIRY_MARGIN_MS: i64 = 5 * 60 * 1000;

/// On-disk auth state. Key names are part of the storage contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AuthData {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Absolute expiry of the access token, epoch milliseconds
    #[serde(default)]
    token_expires_at: Option<i64>,
    #[serde(default)]
    user_data: Option<UserProfile>,
}

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(AUTH_FILE),
        }
    }

    fn read(&self) -> AuthData {
        if !self.path.exists() {
            return AuthData::default();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    warn!(error = %e, "Corrupt auth store, treating as empty");
                    AuthData::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read auth store, treating as empty");
                AuthData::default()
            }
        }
    }

    fn write(&self, data: &AuthData) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(error = %e, "Failed to create auth store directory");
                return;
            }
        }
        match serde_json::to_string_pretty(data) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&self.path, contents) {
                    warn!(error = %e, "Failed to write auth store");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize auth store"),
        }
    }

    /// Persist a fresh token pair, overwriting any prior one.
    ///
    /// `expires_in` is the access token lifetime reported (or assumed) at
    /// issue time. The cached user profile survives the overwrite.
    pub fn store_tokens(&self, access_token: &str, refresh_token: &str, expires_in: Duration) {
        let expires_at = Utc::now().timestamp_millis() + expires_in.as_millis() as i64;
        let mut data = self.read();
        data.access_token = Some(access_token.to_string());
        data.refresh_token = Some(refresh_token.to_string());
        data.token_expires_at = Some(expires_at);
        self.write(&data);
    }

    pub fn get_access_token(&self) -> Option<String> {
        self.read().access_token
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    /// Whether the access token is expired or about to expire.
    ///
    /// True when no expiry is recorded, or when now is within the five-minute
    /// margin of the recorded expiry.
    pub fn is_token_expired(&self) -> bool {
        match self.read().token_expires_at {
            Some(expires_at) => Utc::now().timestamp_millis() >= expires_at - EXPIRY_MARGIN_MS,
            None => true,
        }
    }

    /// Cache the user profile alongside the tokens.
    pub fn store_user_data(&self, user: &UserProfile) {
        let mut data = self.read();
        data.user_data = Some(user.clone());
        self.write(&data);
    }

    pub fn get_user_data(&self) -> Option<UserProfile> {
        self.read().user_data
    }

    /// Remove all persisted auth state. Idempotent.
    pub fn clear_auth_data(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(error = %e, "Failed to clear auth store");
            }
        }
    }

    /// Whether this client holds any credentials.
    ///
    /// A local signal only: it says nothing about whether the server still
    /// accepts them.
    pub fn is_authenticated(&self) -> bool {
        let data = self.read();
        data.access_token.is_some() || data.refresh_token.is_some()
    }
}
