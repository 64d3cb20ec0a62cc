//! HTTP client for the authentication API.
//!
//! This module provides the `ApiClient`, the single chokepoint for outbound
//! requests: it attaches bearer credentials and converts every failure mode
//! into a normalized `ApiError` before anything above it can observe one.
//!
//! There is deliberately no refresh-and-retry loop here. Refresh is
//! orchestrated one level up by the auth service, so a persistently invalid
//! token cannot trigger hidden recursive retries.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::TokenStore;
use crate::config::Config;

use super::ApiError;

/// Transport seam for authenticated API calls.
///
/// `ApiClient` is the production implementation; tests substitute a recording
/// mock. Bodies and results are raw JSON values so the seam stays small.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ApiError>;
    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
    async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError>;
    async fn delete(&self, path: &str) -> Result<Value, ApiError>;

    /// POST authenticating with the *refresh* token instead of the access
    /// token. The backend expects this for `/auth/refresh` and `/auth/logout`;
    /// the distinction is a protocol requirement, not a convenience.
    async fn post_with_refresh_token(
        &self,
        path: &str,
        refresh_token: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError>;
}

/// API client for the auth backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
    store: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// The token store is read (never written) to attach the current access
    /// token to outgoing requests.
    pub fn new(config: Config, store: Arc<TokenStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::from_transport)?;

        Ok(Self {
            client,
            config,
            store,
        })
    }

    /// Perform one request with the given bearer token (if any) and body.
    async fn request(
        &self,
        method: Method,
        path: &str,
        bearer: Option<String>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.config.endpoint(path);
        debug!(method = %method, url = %url, "API request");

        let mut request = self.client.request(method, &url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(ref json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed before a response arrived");
            ApiError::from_transport(e)
        })?;

        Self::check_response(response).await
    }

    /// Check if a response is successful, normalizing the failure if not.
    /// Empty success bodies parse as `Value::Null`.
    async fn check_response(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            return Err(ApiError::from_response(status, &text));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Unparseable success body");
            ApiError::Unknown {
                status: 0,
                message: e.to_string(),
                code: "UNKNOWN_ERROR".to_string(),
            }
        })
    }

    /// The access token to attach, when the store holds one.
    fn access_token(&self) -> Option<String> {
        self.store.get_access_token()
    }
}

#[async_trait]
impl AuthTransport for ApiClient {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, self.access_token(), None)
            .await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::POST, path, self.access_token(), body)
            .await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, self.access_token(), body)
            .await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, self.access_token(), None)
            .await
    }

    async fn post_with_refresh_token(
        &self,
        path: &str,
        refresh_token: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        // Refresh token in the Authorization header, even when an access
        // token is also present in the store.
        self.request(Method::POST, path, Some(refresh_token.to_string()), body)
            .await
    }
}
