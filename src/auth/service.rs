//! Stateless orchestration of the authentication operations.
//!
//! `AuthService` is the only component that touches both the token store and
//! the transport. It holds no state of its own: every call reads what it
//! needs from the store and writes back exactly what the operation's contract
//! says.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, AuthTransport};
use crate::auth::TokenStore;
use crate::models::{
    LoginResponse, RefreshResponse, RegisterResponse, UserProfile, UserSession,
};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";
const REFRESH_PATH: &str = "/auth/refresh";
const PROFILE_PATH: &str = "/auth/profile";
const SESSIONS_PATH: &str = "/auth/sessions";

/// Nominal access-token lifetime in seconds, used when the backend does not
/// report one. This only drives the client's proactive-refresh heuristic;
/// actual expiry enforcement is server-side.
const DEFAULT_TOKEN_TTL_SECS: u64 = 1800;

/// Failure surfaced by the auth service.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Refresh was requested with no stored refresh token.
    /// Fails before any network call is attempted.
    #[error("no refresh token available")]
    MissingRefreshToken,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct AuthService<T: AuthTransport> {
    transport: T,
    store: Arc<TokenStore>,
}

impl<T: AuthTransport> AuthService<T> {
    pub fn new(transport: T, store: Arc<TokenStore>) -> Self {
        Self { transport, store }
    }

    fn parse<R: DeserializeOwned>(value: Value) -> Result<R, AuthError> {
        serde_json::from_value(value).map_err(|e| {
            warn!(error = %e, "Unexpected response shape");
            AuthError::Api(ApiError::Unknown {
                status: 0,
                message: e.to_string(),
                code: "UNKNOWN_ERROR".to_string(),
            })
        })
    }

    /// Persist a freshly issued session.
    ///
    /// Prefers the lifetime the server reported; falls back to the nominal
    /// TTL when the backend omits one.
    fn persist_session(
        &self,
        access_token: &str,
        refresh_token: &str,
        expires_in: Option<u64>,
        user: &UserProfile,
    ) {
        let ttl = expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        self.store
            .store_tokens(access_token, refresh_token, Duration::from_secs(ttl));
        self.store.store_user_data(user);
    }

    /// Authenticate with email and password.
    ///
    /// On success the returned token pair is persisted and the profile
    /// cached. On failure nothing is persisted and the error passes through
    /// untouched.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<UserProfile, AuthError> {
        let body = json!({
            "email": email,
            "password": password,
            "rememberMe": remember_me,
        });
        let value = self.transport.post(LOGIN_PATH, Some(body)).await?;
        let response: LoginResponse = Self::parse(value)?;

        self.persist_session(
            &response.access_token,
            &response.refresh_token,
            response.expires_in,
            &response.user,
        );
        info!(user_id = %response.user.id, "Login succeeded");
        Ok(response.user)
    }

    /// Register a new account. Same persistence contract as `login`.
    ///
    /// Input is assumed pre-validated by the caller; any 400-class response
    /// from the server is still authoritative.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserProfile, AuthError> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password,
            "confirmPassword": confirm_password,
        });
        let value = self.transport.post(REGISTER_PATH, Some(body)).await?;
        let response: RegisterResponse = Self::parse(value)?;

        self.persist_session(
            &response.access_token,
            &response.refresh_token,
            response.expires_in,
            &response.user,
        );
        info!(user_id = %response.user.id, "Registration succeeded");
        Ok(response.user)
    }

    /// Log out this device, or all devices when `all_devices` is set.
    ///
    /// The server notification is best-effort: a failure is logged and
    /// swallowed, and local tokens are cleared unconditionally. The
    /// user-visible contract is "logged out on this device" even with the
    /// network unreachable.
    pub async fn logout(&self, all_devices: bool) {
        if let Some(refresh_token) = self.store.get_refresh_token() {
            let body = json!({ "allDevices": all_devices });
            match self
                .transport
                .post_with_refresh_token(LOGOUT_PATH, &refresh_token, Some(body))
                .await
            {
                Ok(_) => debug!("Server acknowledged logout"),
                Err(e) => warn!(error = %e, "Backend logout notification failed"),
            }
        }
        self.store.clear_auth_data();
        info!("Logged out, local auth state cleared");
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Fails fast when no refresh token is stored. A failed refresh is
    /// conclusive: all local auth data is cleared before the error is
    /// returned, forcing a fresh login.
    pub async fn refresh_token(&self) -> Result<(), AuthError> {
        let refresh_token = self
            .store
            .get_refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;

        let result = self
            .transport
            .post_with_refresh_token(REFRESH_PATH, &refresh_token, None)
            .await
            .map_err(AuthError::from)
            .and_then(Self::parse::<RefreshResponse>);

        match result {
            Ok(response) => {
                let ttl = response.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
                self.store.store_tokens(
                    &response.access_token,
                    &response.refresh_token,
                    Duration::from_secs(ttl),
                );
                debug!("Token pair refreshed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Refresh failed, clearing local auth state");
                self.store.clear_auth_data();
                Err(e)
            }
        }
    }

    /// Fetch the current user's profile with the stored access token.
    /// Does not trigger a refresh.
    pub async fn get_current_user(&self) -> Result<UserProfile, AuthError> {
        let value = self.transport.get(PROFILE_PATH).await?;
        let user: UserProfile = Self::parse(value)?;
        self.store.store_user_data(&user);
        Ok(user)
    }

    /// List the user's active sessions.
    pub async fn get_sessions(&self) -> Result<Vec<UserSession>, AuthError> {
        let value = self.transport.get(SESSIONS_PATH).await?;
        Self::parse(value)
    }

    /// Terminate one session by id.
    pub async fn terminate_session(&self, session_id: &str) -> Result<(), AuthError> {
        self.transport
            .delete(&format!("{}/{}", SESSIONS_PATH, session_id))
            .await?;
        Ok(())
    }

    /// Whether this client holds credentials locally.
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get_access_token()
    }
}
