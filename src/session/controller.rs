//! Application-facing session controller.
//!
//! One instance lives at the application's composition root and owns the
//! in-memory session state; descendants read it and trigger transitions
//! through it. Transitions go through the pure reducer, so the controller
//! itself is just the I/O shell.
//!
//! Operations take `&mut self`: there is no interior locking, and a racing
//! second call would simply overwrite state with whichever response resolves
//! last. Callers are expected to prevent overlapping attempts (e.g. by
//! disabling the submit control while one is in flight).

use tracing::{debug, warn};

use crate::api::{user_message, AuthTransport};
use crate::auth::{AuthError, AuthService};
use crate::models::UserProfile;

use super::state::{reduce, AuthEvent, SessionState};

pub struct SessionController<T: AuthTransport> {
    service: AuthService<T>,
    state: SessionState,
}

impl<T: AuthTransport> SessionController<T> {
    pub fn new(service: AuthService<T>) -> Self {
        Self {
            service,
            state: SessionState::default(),
        }
    }

    fn dispatch(&mut self, event: AuthEvent) {
        debug!(event = event.name(), "Session transition");
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Log in and surface the outcome in session state.
    ///
    /// The original error is returned after dispatching so a form can show
    /// field-level messaging independent of the session-wide error.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(), AuthError> {
        self.dispatch(AuthEvent::AuthStart);
        match self.service.login(email, password, remember_me).await {
            Ok(user) => {
                self.dispatch(AuthEvent::AuthSuccess(user));
                Ok(())
            }
            Err(e) => {
                self.dispatch(AuthEvent::AuthError(user_message(&e)));
                Err(e)
            }
        }
    }

    /// Register a new account. Same state contract as `login`.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        self.dispatch(AuthEvent::AuthStart);
        match self
            .service
            .register(username, email, password, confirm_password)
            .await
        {
            Ok(user) => {
                self.dispatch(AuthEvent::AuthSuccess(user));
                Ok(())
            }
            Err(e) => {
                self.dispatch(AuthEvent::AuthError(user_message(&e)));
                Err(e)
            }
        }
    }

    /// Log out and reset session state. Never fails.
    pub async fn logout(&mut self, all_devices: bool) {
        self.service.logout(all_devices).await;
        self.dispatch(AuthEvent::AuthLogout);
    }

    /// Restore the session on startup.
    ///
    /// A client with no stored credentials stays unauthenticated without any
    /// network call. A failed restoration is silent: the user just ends up
    /// logged out, with stale local tokens purged.
    pub async fn check_auth(&mut self) {
        if !self.service.is_authenticated() {
            return;
        }

        self.dispatch(AuthEvent::AuthStart);
        match self.service.get_current_user().await {
            Ok(user) => self.dispatch(AuthEvent::AuthSuccess(user)),
            Err(e) => {
                warn!(error = %e, "Session restoration failed");
                self.dispatch(AuthEvent::AuthLogout);
                self.service.logout(false).await;
            }
        }
    }

    /// Dismiss the surfaced error.
    pub fn clear_error(&mut self) {
        self.dispatch(AuthEvent::ClearError);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The underlying service, for callers that need session listing or
    /// token access without going through state transitions.
    pub fn service(&self) -> &AuthService<T> {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::api::ApiError;
    use crate::auth::TokenStore;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;

    fn controller() -> (
        tempfile::TempDir,
        SessionController<MockTransport>,
        Arc<TokenStore>,
        MockTransport,
    ) {
        let dir = tempdir().expect("tempdir");
        let store = Arc::new(TokenStore::new(dir.path().to_path_buf()));
        let transport = MockTransport::new();
        let service = AuthService::new(transport.clone(), Arc::clone(&store));
        (dir, SessionController::new(service), store, transport)
    }

    fn login_response() -> serde_json::Value {
        json!({
            "access_token": "AT1",
            "refresh_token": "RT1",
            "user": {
                "id": "u1",
                "email": "a@b.com",
                "username": "ali",
                "createdAt": "2025-01-15T08:00:00Z",
                "updatedAt": "2025-01-15T08:00:00Z",
            },
        })
    }

    #[tokio::test]
    async fn successful_login_authenticates_the_session() {
        let (_dir, mut controller, store, transport) = controller();
        transport.enqueue(Ok(login_response()));

        controller
            .login("a@b.com", "Secret123!", false)
            .await
            .expect("login should succeed");

        assert!(controller.is_authenticated());
        assert_eq!(controller.user().map(|u| u.id.as_str()), Some("u1"));
        assert!(controller.error().is_none());
        assert!(!controller.state().is_loading);
        assert_eq!(store.get_access_token().as_deref(), Some("AT1"));
    }

    #[tokio::test]
    async fn failed_login_surfaces_a_translated_error_and_rethrows() {
        let (_dir, mut controller, _store, transport) = controller();
        transport.enqueue(Err(ApiError::Authentication {
            message: "Invalid credentials".to_string(),
            code: "API_ERROR".to_string(),
        }));

        let err = controller
            .login("a@b.com", "wrong", false)
            .await
            .expect_err("login should fail");

        // Session carries the localized message; the technical message stays
        // on the returned error for diagnostic display.
        assert_eq!(controller.error(), Some("ایمیل یا رمز عبور اشتباه است"));
        assert!(!controller.is_authenticated());
        assert!(controller.user().is_none());
        assert_eq!(
            crate::api::process_auth_error(&err).technical_info,
            "API Error 401: Invalid credentials"
        );
    }

    #[tokio::test]
    async fn new_attempt_clears_the_previous_error() {
        let (_dir, mut controller, _store, transport) = controller();
        transport.enqueue(Err(ApiError::Authentication {
            message: "Invalid credentials".to_string(),
            code: "API_ERROR".to_string(),
        }));
        let _ = controller.login("a@b.com", "wrong", false).await;
        assert!(controller.error().is_some());

        transport.enqueue(Ok(login_response()));
        controller
            .login("a@b.com", "Secret123!", false)
            .await
            .unwrap();
        assert!(controller.error().is_none());
        assert!(controller.is_authenticated());
    }

    #[tokio::test]
    async fn check_auth_without_credentials_makes_no_network_call() {
        let (_dir, mut controller, _store, transport) = controller();

        controller.check_auth().await;

        assert!(transport.calls().is_empty());
        assert_eq!(*controller.state(), SessionState::default());
    }

    #[tokio::test]
    async fn check_auth_restores_a_valid_session() {
        let (_dir, mut controller, store, transport) = controller();
        store.store_tokens("AT1", "RT1", Duration::from_secs(1800));
        transport.enqueue(Ok(json!({
            "id": "u1",
            "email": "a@b.com",
            "username": "ali",
            "createdAt": "2025-01-15T08:00:00Z",
            "updatedAt": "2025-01-15T08:00:00Z",
        })));

        controller.check_auth().await;

        assert!(controller.is_authenticated());
        assert_eq!(controller.user().map(|u| u.id.as_str()), Some("u1"));
    }

    #[tokio::test]
    async fn rejected_restoration_logs_out_silently_and_purges_tokens() {
        let (_dir, mut controller, store, transport) = controller();
        store.store_tokens("AT1", "RT1", Duration::from_secs(1800));
        transport.enqueue(Err(ApiError::Authentication {
            message: "Token expired".to_string(),
            code: "API_ERROR".to_string(),
        }));
        // Best-effort logout notification after the rejection
        transport.enqueue(Ok(json!({ "message": "ok" })));

        controller.check_auth().await;

        // Silent: no error banner, just logged out with an empty store
        assert!(!controller.is_authenticated());
        assert!(controller.error().is_none());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn logout_resets_session_state() {
        let (_dir, mut controller, store, transport) = controller();
        transport.enqueue(Ok(login_response()));
        controller
            .login("a@b.com", "Secret123!", false)
            .await
            .unwrap();
        transport.enqueue(Ok(json!({ "message": "ok" })));

        controller.logout(false).await;

        assert_eq!(*controller.state(), SessionState::default());
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn clear_error_only_clears_the_error() {
        let (_dir, mut controller, _store, transport) = controller();
        transport.enqueue(Err(ApiError::Server {
            status: 500,
            message: "boom".to_string(),
            code: "API_ERROR".to_string(),
        }));
        let _ = controller.login("a@b.com", "pw", false).await;
        assert!(controller.error().is_some());

        controller.clear_error();
        assert!(controller.error().is_none());
        assert!(!controller.is_authenticated());
    }
}
