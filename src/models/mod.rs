//! Data models for the authentication API.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `UserProfile`: the authenticated identity
//! - `LoginResponse`, `RegisterResponse`, `RefreshResponse`, `LogoutResponse`:
//!   endpoint response bodies
//! - `UserSession`: one entry from the active-session listing

pub mod user;

pub use user::{
    LoginResponse, LogoutResponse, RefreshResponse, RegisterResponse, UserProfile, UserSession,
};
