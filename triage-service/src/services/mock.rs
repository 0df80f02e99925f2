//! In-memory collaborators for unit tests.

use super::database::PatientStore;
use super::gateway::{ChatRequest, ChatResponse, CompletionProvider};
use super::storage::Storage;
use crate::error::TriageError;
use crate::models::PatientRow;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Build a gateway response whose first tool call carries `arguments`.
pub fn tool_call_response(name: &str, arguments: &Value) -> ChatResponse {
    serde_json::from_value(json!({
        "choices": [{"message": {"tool_calls": [{
            "type": "function",
            "function": {"name": name, "arguments": arguments.to_string()}
        }]}}]
    }))
    .unwrap()
}

/// Gateway response where the model answered in prose.
pub fn text_response(text: &str) -> ChatResponse {
    serde_json::from_value(json!({
        "choices": [{"message": {"content": text}}]
    }))
    .unwrap()
}

/// Completion provider returning a canned result and recording requests.
pub struct MockCompletionProvider {
    reply: Mutex<Option<Result<ChatResponse, TriageError>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockCompletionProvider {
    pub fn replying(response: ChatResponse) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(response))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: TriageError) -> Self {
        Self {
            reply: Mutex::new(Some(Err(error))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TriageError> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(ChatResponse::default()))
    }
}

pub struct MockStorage {
    pub data: Option<Vec<u8>>,
}

#[async_trait]
impl Storage for MockStorage {
    async fn download(&self, path: &str) -> Result<Vec<u8>, TriageError> {
        self.data
            .clone()
            .ok_or_else(|| TriageError::StorageDownload(format!("404 {} not found", path)))
    }
}

#[derive(Default)]
pub struct MockStore {
    pub inserted: Mutex<Vec<PatientRow>>,
    pub fail: bool,
}

#[async_trait]
impl PatientStore for MockStore {
    async fn insert_patients(&self, rows: &[PatientRow]) -> Result<usize, TriageError> {
        if self.fail {
            return Err(TriageError::StoreInsert("violates not-null constraint".to_string()));
        }
        self.inserted.lock().unwrap().extend_from_slice(rows);
        Ok(rows.len())
    }
}
