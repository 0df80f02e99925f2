use super::triage::{ContributingFactor, TriageResult};
use serde::{Deserialize, Serialize};

/// Patient details submitted for triage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub age: f64,
    pub gender: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub free_text_symptoms: Option<String>,
    #[serde(default)]
    pub vitals: Option<Vitals>,
    #[serde(default)]
    pub pre_existing_conditions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl Vitals {
    pub fn is_empty(&self) -> bool {
        self.blood_pressure.is_none() && self.heart_rate.is_none() && self.temperature.is_none()
    }
}

/// One fabricated patient, as returned by the `synthetic_patients` tool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyntheticPatient {
    pub age: f64,
    pub gender: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub free_text_symptoms: Option<String>,
    #[serde(default)]
    pub blood_pressure: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub pre_existing_conditions: Option<Vec<String>>,
    #[serde(flatten)]
    pub triage: TriageResult,
}

/// Row shape of the external `patients` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRow {
    pub age: f64,
    pub gender: String,
    pub symptoms: Vec<String>,
    pub free_text_symptoms: Option<String>,
    pub blood_pressure: Option<String>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub pre_existing_conditions: Vec<String>,
    pub risk_level: String,
    pub confidence_score: f64,
    pub recommended_department: String,
    pub contributing_factors: Vec<ContributingFactor>,
    pub explanation: String,
    pub is_synthetic: bool,
}

impl From<SyntheticPatient> for PatientRow {
    fn from(p: SyntheticPatient) -> Self {
        PatientRow {
            age: p.age,
            gender: p.gender,
            symptoms: p.symptoms,
            free_text_symptoms: p.free_text_symptoms,
            blood_pressure: p.blood_pressure,
            heart_rate: p.heart_rate,
            temperature: p.temperature,
            pre_existing_conditions: p.pre_existing_conditions.unwrap_or_default(),
            risk_level: p.triage.risk_level.as_str().to_string(),
            confidence_score: p.triage.confidence_score,
            recommended_department: p.triage.recommended_department.as_str().to_string(),
            contributing_factors: p.triage.contributing_factors,
            explanation: p.triage.explanation,
            is_synthetic: true,
        }
    }
}
