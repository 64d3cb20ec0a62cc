//! Authentication: token persistence and operation orchestration.
//!
//! This module provides:
//! - `TokenStore`: durable storage for the token pair, its expiry, and the
//!   cached user profile
//! - `AuthService`: stateless orchestration of login, registration, logout,
//!   refresh, and profile retrieval over the HTTP transport
//!
//! Tokens are persisted to disk; the access token expires on a server-driven
//! schedule with a 5-minute proactive-refresh margin on the client.

pub mod service;
pub mod store;

pub use service::{AuthError, AuthService};
pub use store::TokenStore;
