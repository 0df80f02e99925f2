//! Tool definitions handed to the model.
//!
//! Each action forces exactly one of these functions, so the schemas below are
//! the output contract of the service.

use crate::models::{Department, RiskLevel};
use crate::services::gateway::ToolDefinition;
use serde_json::{json, Map, Value};

pub const TRIAGE_TOOL: &str = "triage_result";
pub const EXTRACT_TOOL: &str = "extracted_patient_data";
pub const SYNTHETIC_TOOL: &str = "synthetic_patients";

/// Number of records requested per synthetic batch.
pub const SYNTHETIC_BATCH_SIZE: usize = 8;

fn risk_levels() -> Vec<&'static str> {
    RiskLevel::ALL.iter().map(|r| r.as_str()).collect()
}

fn departments() -> Vec<&'static str> {
    Department::ALL.iter().map(|d| d.as_str()).collect()
}

fn triage_properties() -> Map<String, Value> {
    let properties = json!({
        "risk_level": {
            "type": "string",
            "enum": risk_levels(),
            "description": "Overall urgency of the patient's condition"
        },
        "confidence_score": {
            "type": "number",
            "minimum": 0,
            "maximum": 100,
            "description": "Confidence in the assessment, 0-100"
        },
        "recommended_department": {
            "type": "string",
            "enum": departments(),
            "description": "Department the patient should be routed to"
        },
        "contributing_factors": {
            "type": "array",
            "description": "Factors that drove the assessment, most important first",
            "items": {
                "type": "object",
                "properties": {
                    "factor": { "type": "string" },
                    "weight": {
                        "type": "number",
                        "minimum": 0,
                        "maximum": 1,
                        "description": "Relative importance, 0-1"
                    }
                },
                "required": ["factor", "weight"]
            }
        },
        "explanation": {
            "type": "string",
            "description": "Short clinical rationale for the assessment"
        }
    });

    match properties {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

const TRIAGE_REQUIRED: [&str; 5] = [
    "risk_level",
    "confidence_score",
    "recommended_department",
    "contributing_factors",
    "explanation",
];

pub fn triage_result_tool() -> ToolDefinition {
    ToolDefinition::function(
        TRIAGE_TOOL,
        "Return the structured triage assessment for the patient",
        json!({
            "type": "object",
            "properties": triage_properties(),
            "required": TRIAGE_REQUIRED,
        }),
    )
}

/// Fields mirror the inbound patient record so a parsed document can be
/// submitted straight back for triage.
pub fn extracted_patient_data_tool() -> ToolDefinition {
    ToolDefinition::function(
        EXTRACT_TOOL,
        "Return the patient information found in the document",
        json!({
            "type": "object",
            "properties": {
                "age": { "type": "number" },
                "gender": { "type": "string" },
                "symptoms": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "freeTextSymptoms": {
                    "type": "string",
                    "description": "Any symptom narrative that does not fit the list"
                },
                "vitals": {
                    "type": "object",
                    "properties": {
                        "bloodPressure": { "type": "string", "description": "e.g. 120/80" },
                        "heartRate": { "type": "number", "description": "Beats per minute" },
                        "temperature": { "type": "number", "description": "Degrees Celsius" }
                    }
                },
                "preExistingConditions": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            }
        }),
    )
}

pub fn synthetic_patients_tool() -> ToolDefinition {
    let mut item_properties = json!({
        "age": { "type": "number" },
        "gender": { "type": "string" },
        "symptoms": { "type": "array", "items": { "type": "string" } },
        "free_text_symptoms": { "type": "string" },
        "blood_pressure": { "type": "string" },
        "heart_rate": { "type": "number" },
        "temperature": { "type": "number" },
        "pre_existing_conditions": { "type": "array", "items": { "type": "string" } }
    });
    if let Value::Object(map) = &mut item_properties {
        map.extend(triage_properties());
    }

    let mut required = vec!["age", "gender", "symptoms"];
    required.extend(TRIAGE_REQUIRED);

    ToolDefinition::function(
        SYNTHETIC_TOOL,
        "Return a batch of realistic, fictional patients with their triage assessments",
        json!({
            "type": "object",
            "properties": {
                "patients": {
                    "type": "array",
                    "minItems": SYNTHETIC_BATCH_SIZE,
                    "maxItems": SYNTHETIC_BATCH_SIZE,
                    "items": {
                        "type": "object",
                        "properties": item_properties,
                        "required": required,
                    }
                }
            },
            "required": ["patients"]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_schema_enumerates_all_departments() {
        let tool = triage_result_tool();
        let params = &tool.function.parameters;

        assert_eq!(tool.name(), TRIAGE_TOOL);
        let depts = params["properties"]["recommended_department"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(depts.len(), 10);
        assert!(depts.contains(&json!("General Medicine")));
        assert_eq!(
            params["properties"]["risk_level"]["enum"],
            json!(["Low", "Medium", "High"])
        );
        assert_eq!(params["required"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn synthetic_items_carry_triage_fields() {
        let tool = synthetic_patients_tool();
        let items = &tool.function.parameters["properties"]["patients"]["items"];

        assert!(items["properties"]["recommended_department"]["enum"].is_array());
        assert!(items["properties"]["blood_pressure"].is_object());
        let required = items["required"].as_array().unwrap();
        assert!(required.contains(&json!("risk_level")));
        assert!(!required.contains(&json!("blood_pressure")));
    }

    #[test]
    fn extraction_schema_has_no_required_fields() {
        let tool = extracted_patient_data_tool();
        assert_eq!(tool.name(), EXTRACT_TOOL);
        assert!(tool.function.parameters.get("required").is_none());
    }
}
