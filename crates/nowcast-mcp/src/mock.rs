//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{McpError, Result};
use crate::transport::Transport;

/// A transport that replays queued responses and records every request.
///
/// Responses are returned in order. If more requests are made than
/// responses queued, an [`McpError::Unexpected`] is returned.
pub struct MockTransport {
    endpoint: String,
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    request_log: Mutex<Vec<Value>>,
    closed: AtomicBool,
}

impl MockTransport {
    /// Create an empty mock transport.
    pub fn new() -> Self {
        Self {
            endpoint: "mock://mcp".to_string(),
            responses: Mutex::new(VecDeque::new()),
            request_log: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a mock transport that answers once with the given JSON body.
    pub fn with_json(body: Value) -> Self {
        let transport = Self::new();
        transport.push_json(body);
        transport
    }

    /// Queue a JSON response body.
    pub fn push_json(&self, body: Value) {
        self.push_body(body.to_string());
    }

    /// Queue a raw response body.
    pub fn push_body(&self, body: impl Into<Vec<u8>>) {
        self.responses.lock().push_back(Ok(body.into()));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&self, err: McpError) {
        self.responses.lock().push_back(Err(err));
    }

    /// All requests sent so far, decoded as JSON.
    pub fn requests(&self) -> Vec<Value> {
        self.request_log.lock().clone()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.request_log.lock().len()
    }

    /// Whether the transport has been shut down.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, body: Vec<u8>) -> Result<Vec<u8>> {
        if self.is_closed() {
            return Err(McpError::connection("transport closed"));
        }

        self.request_log
            .lock()
            .push(serde_json::from_slice(&body).unwrap_or(Value::Null));

        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(McpError::unexpected(
                "MockTransport: no more responses available",
            ))
        })
    }

    async fn shutdown(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
