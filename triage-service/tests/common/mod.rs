use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use tower::ServiceExt;
use triage_service::config::TriageConfig;
use triage_service::startup::{build_router, AppState};
use wiremock::MockServer;

pub const GATEWAY_PATH: &str = "/v1/chat/completions";

/// Router wired to a mock server that plays both the AI gateway and the
/// Supabase project.
pub struct TestApp {
    pub server: MockServer,
    pub router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let server = MockServer::start().await;

        let vars: HashMap<&str, String> = HashMap::from([
            ("AI_GATEWAY_URL", format!("{}{}", server.uri(), GATEWAY_PATH)),
            ("AI_GATEWAY_API_KEY", "test-gateway-key".to_string()),
            ("STORAGE_URL", server.uri()),
            ("STORAGE_SERVICE_KEY", "test-service-key".to_string()),
        ]);

        let config = TriageConfig::from_source(
            CoreConfig {
                port: 0,
                ..Default::default()
            },
            |key| vars.get(key).cloned(),
        )
        .expect("Failed to build test configuration");

        let state = AppState::from_config(config).expect("Failed to build app state");

        TestApp {
            server,
            router: build_router(state),
        }
    }

    pub async fn post(&self, body: Value) -> Response {
        self.post_raw(body.to_string()).await
    }

    pub async fn post_raw(&self, body: String) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Bodies of every request the gateway mock received.
    pub async fn gateway_requests(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == GATEWAY_PATH)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn tool_call(name: &str, arguments: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": name, "arguments": arguments.to_string() }
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}

pub fn prose(text: &str) -> Value {
    json!({
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

pub fn patient() -> Value {
    json!({
        "age": 67,
        "gender": "female",
        "symptoms": ["shortness of breath", "ankle swelling"],
        "vitals": { "bloodPressure": "160/100", "heartRate": 104 },
        "preExistingConditions": ["heart failure"]
    })
}
