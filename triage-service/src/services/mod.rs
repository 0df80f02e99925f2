pub mod database;
pub mod documents;
pub mod gateway;
pub mod metrics;
pub mod storage;
pub mod synthetic;
pub mod tools;
pub mod triage;

#[cfg(test)]
pub(crate) mod mock;

pub use database::{PatientStore, SupabaseStore};
pub use gateway::{CompletionProvider, GatewayClient};
pub use self::metrics::{get_metrics, init_metrics};
pub use storage::{Storage, SupabaseStorage};
