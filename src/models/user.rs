//! Wire types for the authentication API.
//!
//! Field names follow the backend's JSON casing exactly: profile fields are
//! camelCase, token fields are snake_case. Keep the renames in sync with the
//! server contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user profile as returned by `/auth/profile` and embedded
/// in login/registration responses.
///
/// Replaced wholesale on every successful fetch; `id` is immutable once
/// assigned by the backend (a CUID string, not a number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "failedLoginAttempts", default)]
    pub failed_login_attempts: u32,
    #[serde(rename = "lockedUntil", default)]
    pub locked_until: Option<DateTime<Utc>>,
    #[serde(rename = "lastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(rename = "lastActiveAt", default)]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Whether the account is currently locked out.
    ///
    /// Lockout is enforced server-side; this only exists so callers can
    /// display the state, never to gate a request locally.
    pub fn is_locked_out(&self) -> bool {
        self.locked_until.map(|t| t > Utc::now()).unwrap_or(false)
    }
}

/// Response body from `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, when the backend reports one.
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserProfile,
}

/// Response body from `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserProfile,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body from `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Response body from `POST /auth/logout`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// One active session from `GET /auth/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSession {
    pub id: String,
    #[serde(rename = "userAgent", default)]
    pub user_agent: Option<String>,
    #[serde(rename = "ipAddress")]
    pub ip_address: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "lastUsed")]
    pub last_used: DateTime<Utc>,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}
