pub mod ai;

pub use ai::{Action, AiRequest, ParseDocumentResponse, SyntheticResponse};
