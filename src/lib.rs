//! authkit - client-side authentication session management.
//!
//! This crate wraps a token-based REST auth backend with four layers,
//! leaf to root:
//!
//! - [`auth::TokenStore`]: durable persistence of the token pair, its
//!   expiry, and a cached user profile
//! - [`api::ApiClient`]: the single outbound chokepoint that attaches
//!   bearer credentials and normalizes every failure into [`api::ApiError`]
//! - [`auth::AuthService`]: stateless orchestration of login, registration,
//!   logout, refresh, and profile retrieval
//! - [`session::SessionController`]: the application-facing state machine
//!   exposing authenticated/loading/error state to the UI layer
//!
//! A typical application builds one stack at startup and calls
//! `check_auth()` once to restore any prior session:
//!
//! ```no_run
//! use std::sync::Arc;
//! use authkit::{ApiClient, AuthService, Config, SessionController, TokenStore};
//!
//! # async fn start() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let store = Arc::new(TokenStore::new(config.data_dir()?));
//! let client = ApiClient::new(config, Arc::clone(&store))?;
//! let mut session = SessionController::new(AuthService::new(client, store));
//! session.check_auth().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod session;

pub use api::{ApiClient, ApiError, AuthTransport, ProcessedError};
pub use auth::{AuthError, AuthService, TokenStore};
pub use config::Config;
pub use models::{UserProfile, UserSession};
pub use session::{AuthEvent, SessionController, SessionState};
