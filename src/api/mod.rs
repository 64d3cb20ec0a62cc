//! HTTP layer for the authentication backend.
//!
//! This module provides the `ApiClient` for talking to the auth API, the
//! `AuthTransport` seam it implements, the normalized `ApiError` every
//! failure collapses into, and the translation step that turns those errors
//! into user-facing messages.
//!
//! Ordinary requests authenticate with the access token; refresh and logout
//! authenticate with the refresh token via `post_with_refresh_token`.

pub mod client;
pub mod error;
pub mod messages;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, AuthTransport};
pub use error::ApiError;
pub use messages::{full_message, process_auth_error, user_message, ProcessedError};
