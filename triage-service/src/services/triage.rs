//! Patient triage: describe the patient in prose and force a
//! `triage_result` tool call.

use crate::error::TriageError;
use crate::models::PatientRecord;
use crate::services::gateway::{ChatMessage, ChatRequest, CompletionProvider};
use crate::services::tools::triage_result_tool;
use serde_json::Value;

const SYSTEM_PROMPT: &str = "You are an experienced emergency triage clinician. \
Assess the patient's urgency, pick the single most appropriate hospital department, \
and list the factors that drove your decision with weights between 0 and 1. \
Always answer by calling the triage_result function.";

/// Render the patient as prompt text. Absent optional fields are left out
/// entirely rather than rendered as blanks.
pub fn build_triage_prompt(patient: &PatientRecord) -> String {
    let mut lines = vec![
        "Assess the following patient.".to_string(),
        String::new(),
        format!("Age: {}", patient.age),
        format!("Gender: {}", patient.gender),
        format!("Symptoms: {}", patient.symptoms.join(", ")),
    ];

    if let Some(text) = patient
        .free_text_symptoms
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    {
        lines.push(format!("Additional symptom description: {}", text.trim()));
    }

    if let Some(vitals) = patient.vitals.as_ref().filter(|v| !v.is_empty()) {
        lines.push("Vitals:".to_string());
        if let Some(bp) = &vitals.blood_pressure {
            lines.push(format!("- Blood pressure: {}", bp));
        }
        if let Some(hr) = vitals.heart_rate {
            lines.push(format!("- Heart rate: {} bpm", hr));
        }
        if let Some(temp) = vitals.temperature {
            lines.push(format!("- Temperature: {}°C", temp));
        }
    }

    if let Some(conditions) = patient
        .pre_existing_conditions
        .as_ref()
        .filter(|c| !c.is_empty())
    {
        lines.push(format!("Pre-existing conditions: {}", conditions.join(", ")));
    }

    lines.join("\n")
}

/// Run a triage assessment. The tool arguments are returned untouched.
pub async fn assess_patient(
    provider: &dyn CompletionProvider,
    patient: &PatientRecord,
) -> Result<Value, TriageError> {
    let request = ChatRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_triage_prompt(patient)),
    ])
    .with_forced_tool(triage_result_tool());

    let response = provider.complete(request).await?;
    let result = response
        .parse_tool_arguments()?
        .ok_or(TriageError::MissingToolCall)?;

    tracing::info!(
        risk_level = result
            .get("risk_level")
            .and_then(|v| v.as_str())
            .unwrap_or("-"),
        department = result
            .get("recommended_department")
            .and_then(|v| v.as_str())
            .unwrap_or("-"),
        "Triage assessment complete"
    );

    Ok(result)
}
