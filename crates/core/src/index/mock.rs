//! Mock index for testing.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{IndexError, SearchParams, TorrentIndex, UserParams};

/// A recorded index call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Search { query: String },
    ByUser { username: String },
    ById { id: String },
}

/// Mock implementation of the `TorrentIndex` trait.
///
/// Returns a configurable canned response and records every call. A queued
/// error is returned once, then the mock reverts to the canned response.
#[derive(Debug, Default)]
pub struct MockIndex {
    response: Mutex<Option<Value>>,
    next_error: Mutex<Option<IndexError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockIndex {
    /// Create a mock that answers every call with an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw response returned by subsequent calls.
    pub fn set_response(&self, response: Value) {
        *self.response.lock().expect("mock lock poisoned") = Some(response);
    }

    /// Fail the next call with the given error.
    pub fn fail_next(&self, error: IndexError) {
        *self.next_error.lock().expect("mock lock poisoned") = Some(error);
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    fn respond(&self, call: RecordedCall) -> Result<Value, IndexError> {
        self.calls.lock().expect("mock lock poisoned").push(call);

        if let Some(error) = self.next_error.lock().expect("mock lock poisoned").take() {
            return Err(error);
        }

        Ok(self
            .response
            .lock()
            .expect("mock lock poisoned")
            .clone()
            .unwrap_or_else(|| json!({ "data": [] })))
    }
}

#[async_trait]
impl TorrentIndex for MockIndex {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, params: &SearchParams) -> Result<Value, IndexError> {
        self.respond(RecordedCall::Search {
            query: params.query.clone(),
        })
    }

    async fn by_user(&self, username: &str, _params: &UserParams) -> Result<Value, IndexError> {
        self.respond(RecordedCall::ByUser {
            username: username.to_string(),
        })
    }

    async fn by_id(&self, id: &str) -> Result<Value, IndexError> {
        self.respond(RecordedCall::ById { id: id.to_string() })
    }
}
