//! Domain models for the triage service.

pub mod patient;
pub mod triage;

pub use patient::{PatientRecord, PatientRow, SyntheticPatient, Vitals};
pub use triage::{ContributingFactor, Department, RiskLevel, TriageResult};
