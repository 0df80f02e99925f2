//! Error type for the AI endpoint.
//!
//! Every failure is flattened into `{"error": "<message>"}`. The HTTP status
//! is derived from the message text, so gateway rate-limit and billing
//! failures surface as 429 and 402 regardless of which layer produced them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Rate limit exceeded, please try again later.")]
    RateLimited,

    #[error("Payment required, please add credits to the AI gateway workspace.")]
    PaymentRequired,

    #[error("AI gateway error: {status}")]
    Upstream { status: u16, body: String },

    #[error("AI gateway unreachable: {0}")]
    Network(String),

    #[error("AI gateway returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("No tool call in AI response")]
    MissingToolCall,

    #[error("Failed to parse tool call arguments: {0}")]
    MalformedArguments(#[from] serde_json::Error),

    #[error("Storage download failed: {0}")]
    StorageDownload(String),

    #[error("Patient insert failed: {0}")]
    StoreInsert(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Map an error message to a response status by inspecting its text.
pub fn status_for_message(message: &str) -> StatusCode {
    if message.contains("Rate limit") {
        StatusCode::TOO_MANY_REQUESTS
    } else if message.contains("Payment required") {
        StatusCode::PAYMENT_REQUIRED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for TriageError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = status_for_message(&message);

        tracing::error!(status = %status, error = %message, "AI request failed");

        (status, Json(json!({ "error": message }))).into_response()
    }
}
