//! Synthetic demo data: ask the model for a batch of fictional patients with
//! triage assessments and bulk-insert them.

use crate::error::TriageError;
use crate::models::{PatientRow, SyntheticPatient};
use crate::services::database::PatientStore;
use crate::services::gateway::{ChatMessage, ChatRequest, CompletionProvider};
use crate::services::tools::{synthetic_patients_tool, SYNTHETIC_BATCH_SIZE};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SyntheticBatch {
    #[serde(default)]
    patients: Vec<Value>,
}

fn generation_prompt() -> String {
    format!(
        "Generate {} realistic but entirely fictional emergency department patients. \
Vary age, gender, presenting complaints and severity so that every risk level appears \
and at least five different departments are represented. Include vitals and pre-existing \
conditions where clinically plausible, and give each patient a triage assessment.",
        SYNTHETIC_BATCH_SIZE
    )
}

/// Generate and store a synthetic batch; returns the number of rows inserted.
pub async fn generate_synthetic(
    provider: &dyn CompletionProvider,
    store: &dyn PatientStore,
) -> Result<usize, TriageError> {
    let request = ChatRequest::new(vec![ChatMessage::user(generation_prompt())])
        .with_forced_tool(synthetic_patients_tool());

    let response = provider.complete(request).await?;
    let raw = response
        .parse_tool_arguments()?
        .ok_or(TriageError::MissingToolCall)?;

    let batch: SyntheticBatch = serde_json::from_value(raw)?;
    let rows = batch
        .patients
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<SyntheticPatient>(record)
                .map(PatientRow::from)
                .map_err(|e| {
                    tracing::error!(index, error = %e, "Rejected synthetic patient record");
                    TriageError::from(e)
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = rows.len(), "Generated synthetic patients");

    store.insert_patients(&rows).await
}
