//! Session state and its pure transition function.
//!
//! State changes are centralized in `reduce` so they stay replayable for
//! debugging and testing. The controller is the imperative shell that calls
//! it and performs the associated I/O; nothing else mutates session state.

use crate::models::UserProfile;

/// The logical authentication state of the running client.
///
/// Invariant: `is_authenticated` implies `user` is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Events that drive session transitions.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// An auth operation started; clears any previous error
    AuthStart,
    /// Login, registration, or restoration produced a profile
    AuthSuccess(UserProfile),
    /// An auth operation failed with a user-facing message
    AuthError(String),
    /// Session ended, locally or because the server rejected it
    AuthLogout,
    /// Dismiss the surfaced error without changing anything else
    ClearError,
}

impl AuthEvent {
    /// Short name for logging without dumping payloads.
    pub fn name(&self) -> &'static str {
        match self {
            AuthEvent::AuthStart => "auth_start",
            AuthEvent::AuthSuccess(_) => "auth_success",
            AuthEvent::AuthError(_) => "auth_error",
            AuthEvent::AuthLogout => "auth_logout",
            AuthEvent::ClearError => "clear_error",
        }
    }
}

/// Apply one event to the session state.
pub fn reduce(state: SessionState, event: AuthEvent) -> SessionState {
    match event {
        AuthEvent::AuthStart => SessionState {
            is_loading: true,
            error: None,
            ..state
        },

        AuthEvent::AuthSuccess(user) => SessionState {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
            error: None,
        },

        AuthEvent::AuthError(message) => SessionState {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: Some(message),
        },

        AuthEvent::AuthLogout => SessionState::default(),

        AuthEvent::ClearError => SessionState {
            error: None,
            ..state
        },
    }
}
