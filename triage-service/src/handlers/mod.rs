//! HTTP handlers for the triage service.

pub mod ai;
pub mod health;

pub use ai::{handle_ai_request, preflight};
pub use health::{health_check, metrics_endpoint};
