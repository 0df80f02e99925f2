//! AI gateway client.
//!
//! Speaks the OpenAI-compatible chat completions protocol. Every call in this
//! service forces a single named tool, so the interesting part of a response
//! is `choices[0].message.tool_calls[0].function.arguments`.

use crate::config::GatewayConfig;
use crate::error::TriageError;
use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Trait for chat completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TriageError>;
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// Inline binary payload as a `data:` URL.
    pub fn inline_data(mime_type: &str, base64_data: &str) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", mime_type, base64_data),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolChoiceFunction {
    pub name: String,
}

impl ToolChoice {
    /// Require the model to call exactly this function.
    pub fn forced(name: &str) -> Self {
        Self {
            kind: "function".to_string(),
            function: ToolChoiceFunction {
                name: name.to_string(),
            },
        }
    }
}

/// Chat request without the model; the client fills that in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            tools: None,
            tool_choice: None,
        }
    }

    /// Offer a single tool and force the model to call it.
    pub fn with_forced_tool(mut self, tool: ToolDefinition) -> Self {
        self.tool_choice = Some(ToolChoice::forced(tool.name()));
        self.tools = Some(vec![tool]);
        self
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a ChatRequest,
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

impl ChatResponse {
    /// Raw arguments string of the first tool call, if the model made one.
    pub fn tool_arguments(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.tool_calls.as_ref())
            .and_then(|calls| calls.first())
            .map(|call| call.function.arguments.as_str())
    }

    /// Parse the first tool call's arguments.
    ///
    /// `Ok(None)` means the model did not call a tool at all; callers decide
    /// whether that is fatal.
    pub fn parse_tool_arguments(&self) -> Result<Option<Value>, TriageError> {
        match self.tool_arguments() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }
}

// ============================================================================
// HTTP client
// ============================================================================

/// Chat completions over HTTP with bearer-token auth.
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl CompletionProvider for GatewayClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TriageError> {
        let body = CompletionBody {
            model: &self.config.model,
            request: &request,
        };

        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            tool = request.tool_choice.as_ref().map(|c| c.function.name.as_str()),
            "Sending request to AI gateway"
        );

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                counter!("ai_gateway_requests_total", "status" => "network_error").increment(1);
                TriageError::Network(e.to_string())
            })?;

        let status = response.status();
        counter!("ai_gateway_requests_total", "status" => status.as_u16().to_string())
            .increment(1);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %error_text, "AI gateway error");

            return Err(match status.as_u16() {
                429 => TriageError::RateLimited,
                402 => TriageError::PaymentRequired,
                code => TriageError::Upstream {
                    status: code,
                    body: error_text,
                },
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| TriageError::InvalidResponse(e.to_string()))
    }
}
