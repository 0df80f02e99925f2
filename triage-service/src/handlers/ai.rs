use crate::dtos::{Action, AiRequest, ParseDocumentResponse, SyntheticResponse};
use crate::error::TriageError;
use crate::services::metrics::record_action;
use crate::services::{documents, synthetic, triage};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// CORS preflight; the headers themselves come from the CORS middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Single AI endpoint dispatching on the `action` field.
///
/// The body is parsed by hand so malformed JSON is reported through the same
/// `{"error": ...}` envelope as every other failure.
pub async fn handle_ai_request(State(state): State<AppState>, body: Bytes) -> Response {
    let request: AiRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            record_action("invalid", "error");
            return TriageError::InvalidRequest(e.to_string()).into_response();
        }
    };

    let label = request
        .action
        .parse::<Action>()
        .map(|a| a.as_str())
        .unwrap_or("unknown");

    match dispatch(&state, &request).await {
        Ok(value) => {
            record_action(label, "success");
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => {
            record_action(label, "error");
            e.into_response()
        }
    }
}

#[tracing::instrument(skip_all, fields(action = %request.action))]
async fn dispatch(state: &AppState, request: &AiRequest) -> Result<Value, TriageError> {
    let action: Action = request.action.parse()?;

    match action {
        Action::Triage => {
            let patient = request
                .patient
                .as_ref()
                .ok_or(TriageError::MissingField("patient"))?;
            triage::assess_patient(state.provider.as_ref(), patient).await
        }
        Action::ParseDocument => {
            let file_path = request
                .file_path
                .as_deref()
                .ok_or(TriageError::MissingField("filePath"))?;
            let parsed =
                documents::parse_document(state.provider.as_ref(), state.storage.as_ref(), file_path)
                    .await?;
            Ok(serde_json::to_value(ParseDocumentResponse { parsed })?)
        }
        Action::GenerateSynthetic => {
            let count =
                synthetic::generate_synthetic(state.provider.as_ref(), state.store.as_ref()).await?;
            Ok(serde_json::to_value(SyntheticResponse {
                success: true,
                count,
            })?)
        }
    }
}
