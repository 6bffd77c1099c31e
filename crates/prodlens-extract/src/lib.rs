//! Two-stage product extraction over Bright Data and OpenAI.
//!
//! Stage one lets the model call the `amazonProduct` tool, backed by the
//! Bright Data Amazon dataset, until it answers in prose. Stage two asks the
//! model to restate that answer as a [`prodlens_core::ProductAnalysisData`]
//! under a JSON schema, then validates the result.

pub mod brightdata;
pub mod error;
pub mod openai;
pub mod pipeline;

pub use brightdata::BrightDataClient;
pub use error::ExtractError;
pub use openai::ChatClient;
pub use pipeline::Extractor;
