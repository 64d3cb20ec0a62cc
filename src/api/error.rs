use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Normalized API failure.
///
/// Every failure mode of the HTTP layer collapses into one of these variants,
/// each carrying the backend's message, the HTTP status (0 for transport-level
/// failures), and a machine-readable code. Upper layers never see raw
/// `reqwest` errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400-class response: malformed input, weak password, duplicate email.
    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        code: String,
    },

    /// 401: bad credentials or an access token the server no longer accepts.
    #[error("{message}")]
    Authentication { message: String, code: String },

    /// 423: account locked after repeated failed logins.
    #[error("{message}")]
    AccountLocked { message: String, code: String },

    /// 429: too many requests against this endpoint.
    #[error("{message}")]
    RateLimited { message: String, code: String },

    /// 5xx response.
    #[error("server error {status}: {message}")]
    Server {
        status: u16,
        message: String,
        code: String,
    },

    /// Request was sent but no response arrived.
    #[error("{message}")]
    Network { message: String },

    /// Anything else, including requests that could not be constructed.
    #[error("{message}")]
    Unknown {
        status: u16,
        message: String,
        code: String,
    },
}

/// Maximum length for error response bodies in log output
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Message used when the server gave no usable error body
const FALLBACK_MESSAGE: &str = "An error occurred";

/// Message for transport failures where the request never got a response
pub const NETWORK_ERROR_MESSAGE: &str = "Network error - please check your connection";

/// Code used when the error body carries no machine-readable code
const DEFAULT_API_CODE: &str = "API_ERROR";

/// Structured error body the backend returns alongside non-2xx statuses.
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Normalize a non-2xx response into an `ApiError`.
    ///
    /// The body is parsed as `{message, error}`; a body without those fields
    /// falls back to a generic message and the default code.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_else(|_| {
            debug!(body = %Self::truncate_body(body), "Unstructured error body");
            ErrorBody::default()
        });
        let message = parsed.message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        let code = parsed.error.unwrap_or_else(|| DEFAULT_API_CODE.to_string());

        match status.as_u16() {
            401 => ApiError::Authentication { message, code },
            423 => ApiError::AccountLocked { message, code },
            429 => ApiError::RateLimited { message, code },
            400..=499 => ApiError::Validation {
                status: status.as_u16(),
                message,
                code,
            },
            500..=599 => ApiError::Server {
                status: status.as_u16(),
                message,
                code,
            },
            _ => ApiError::Unknown {
                status: status.as_u16(),
                message,
                code,
            },
        }
    }

    /// Normalize a transport-level failure.
    ///
    /// A request that was sent but never answered (connect, timeout, broken
    /// connection) is a `Network` error; one that could not even be built is
    /// `Unknown`.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            ApiError::Unknown {
                status: 0,
                message: err.to_string(),
                code: "UNKNOWN_ERROR".to_string(),
            }
        } else {
            ApiError::Network {
                message: NETWORK_ERROR_MESSAGE.to_string(),
            }
        }
    }

    /// HTTP status associated with this error, 0 for transport failures.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Unknown { status, .. } => *status,
            ApiError::Authentication { .. } => 401,
            ApiError::AccountLocked { .. } => 423,
            ApiError::RateLimited { .. } => 429,
            ApiError::Network { .. } => 0,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            ApiError::Validation { code, .. }
            | ApiError::Authentication { code, .. }
            | ApiError::AccountLocked { code, .. }
            | ApiError::RateLimited { code, .. }
            | ApiError::Server { code, .. }
            | ApiError::Unknown { code, .. } => code,
            ApiError::Network { .. } => "NETWORK_ERROR",
        }
    }

    /// Raw backend (or transport) message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::Authentication { message, .. }
            | ApiError::AccountLocked { message, .. }
            | ApiError::RateLimited { message, .. }
            | ApiError::Server { message, .. }
            | ApiError::Network { message }
            | ApiError::Unknown { message, .. } => message,
        }
    }
}
