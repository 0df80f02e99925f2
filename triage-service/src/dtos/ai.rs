use crate::error::TriageError;
use crate::models::PatientRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Body of the AI endpoint. Which optional field is required depends on
/// `action`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    pub action: String,
    #[serde(default)]
    pub patient: Option<PatientRecord>,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Triage,
    ParseDocument,
    GenerateSynthetic,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Triage => "triage",
            Action::ParseDocument => "parse-document",
            Action::GenerateSynthetic => "generate-synthetic",
        }
    }
}

impl FromStr for Action {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triage" => Ok(Action::Triage),
            "parse-document" => Ok(Action::ParseDocument),
            "generate-synthetic" => Ok(Action::GenerateSynthetic),
            other => Err(TriageError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseDocumentResponse {
    pub parsed: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SyntheticResponse {
    pub success: bool,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actions_round_trip_through_their_names() {
        for action in [Action::Triage, Action::ParseDocument, Action::GenerateSynthetic] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "diagnose".parse::<Action>().unwrap_err();
        assert!(matches!(err, TriageError::UnknownAction(a) if a == "diagnose"));
    }

    #[test]
    fn no_extraction_serializes_as_null() {
        let body = serde_json::to_value(ParseDocumentResponse { parsed: None }).unwrap();
        assert_eq!(body, json!({"parsed": null}));
    }

    #[test]
    fn request_uses_camel_case_file_path() {
        let request: AiRequest = serde_json::from_value(json!({
            "action": "parse-document",
            "filePath": "uploads/a.pdf"
        }))
        .unwrap();
        assert_eq!(request.file_path.as_deref(), Some("uploads/a.pdf"));
        assert!(request.patient.is_none());
    }
}
