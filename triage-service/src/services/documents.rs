//! Medical document parsing: fetch the upload from storage, inline it into
//! the prompt and force an `extracted_patient_data` tool call.

use crate::error::TriageError;
use crate::services::gateway::{ChatMessage, ChatRequest, CompletionProvider, ContentPart};
use crate::services::storage::Storage;
use crate::services::tools::extracted_patient_data_tool;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;

const EXTRACTION_PROMPT: &str = "Extract the patient information from this medical document: \
age, gender, symptoms, any free-text symptom description, vitals (blood pressure, heart rate, \
temperature) and pre-existing conditions. Leave out anything the document does not state. \
Answer by calling the extracted_patient_data function.";

/// Mime type from the path suffix alone; anything that is not a PDF is sent
/// as a JPEG.
pub fn mime_type_for(path: &str) -> &'static str {
    if path.ends_with(".pdf") {
        "application/pdf"
    } else {
        "image/jpeg"
    }
}

/// Parse a stored document.
///
/// `Ok(None)` when the model declines to call the tool: a document with no
/// extractable patient data is not an error.
pub async fn parse_document(
    provider: &dyn CompletionProvider,
    storage: &dyn Storage,
    file_path: &str,
) -> Result<Option<Value>, TriageError> {
    let data = storage.download(file_path).await?;
    let mime_type = mime_type_for(file_path);
    let encoded = STANDARD.encode(&data);

    tracing::debug!(
        path = %file_path,
        mime_type = mime_type,
        size = data.len(),
        "Sending document for extraction"
    );

    let request = ChatRequest::new(vec![ChatMessage::user_parts(vec![
        ContentPart::text(EXTRACTION_PROMPT),
        ContentPart::inline_data(mime_type, &encoded),
    ])])
    .with_forced_tool(extracted_patient_data_tool());

    let response = provider.complete(request).await?;
    let parsed = response.parse_tool_arguments()?;

    if parsed.is_none() {
        tracing::warn!(path = %file_path, "Model returned no extraction for document");
    }

    Ok(parsed)
}
