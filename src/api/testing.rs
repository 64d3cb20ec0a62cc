//! Recording mock transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, AuthTransport};

/// One captured transport call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    /// Bearer passed explicitly (refresh-token calls only)
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
}

/// Mock transport: replays a queue of canned responses and records every
/// call it receives. Clones share the same queue and call log, so a test can
/// keep a handle after handing one to the service.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, response: Result<Value, ApiError>) {
        self.inner.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.inner.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            bearer: bearer.map(str::to_string),
            body,
        });
        self.inner
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no canned response for {} {}", method, path))
    }
}

#[async_trait]
impl AuthTransport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.record("GET", path, None, None)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.record("POST", path, None, body)
    }

    async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        self.record("PUT", path, None, body)
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.record("DELETE", path, None, None)
    }

    async fn post_with_refresh_token(
        &self,
        path: &str,
        refresh_token: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.record("POST", path, Some(refresh_token), body)
    }
}
