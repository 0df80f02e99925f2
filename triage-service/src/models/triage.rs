use serde::{Deserialize, Serialize};

/// Urgency bucket assigned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Hospital department a patient can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Emergency,
    Cardiology,
    Neurology,
    Pulmonology,
    Gastroenterology,
    Orthopedics,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Pediatrics,
    Obstetrics,
    Psychiatry,
}

impl Department {
    pub const ALL: [Department; 10] = [
        Department::Emergency,
        Department::Cardiology,
        Department::Neurology,
        Department::Pulmonology,
        Department::Gastroenterology,
        Department::Orthopedics,
        Department::GeneralMedicine,
        Department::Pediatrics,
        Department::Obstetrics,
        Department::Psychiatry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Emergency => "Emergency",
            Department::Cardiology => "Cardiology",
            Department::Neurology => "Neurology",
            Department::Pulmonology => "Pulmonology",
            Department::Gastroenterology => "Gastroenterology",
            Department::Orthopedics => "Orthopedics",
            Department::GeneralMedicine => "General Medicine",
            Department::Pediatrics => "Pediatrics",
            Department::Obstetrics => "Obstetrics",
            Department::Psychiatry => "Psychiatry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub factor: String,
    /// Relative importance, 0.0 - 1.0.
    pub weight: f64,
}

/// Structured triage assessment returned through the `triage_result` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub risk_level: RiskLevel,
    /// 0 - 100.
    pub confidence_score: f64,
    pub recommended_department: Department,
    #[serde(default)]
    pub contributing_factors: Vec<ContributingFactor>,
    pub explanation: String,
}
