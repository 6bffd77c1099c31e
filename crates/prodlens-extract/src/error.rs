use prodlens_core::SchemaViolation;
use thiserror::Error;

/// Errors returned while extracting a product record.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream API answered with a non-2xx status.
    #[error("{service} returned {status}: {message}")]
    Upstream {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model returned no content")]
    EmptyResponse,

    /// The model kept calling tools past the configured number of steps.
    #[error("model did not finish within {max_steps} steps")]
    StepLimit { max_steps: u32 },

    #[error("extracted record violates the schema at {0}")]
    Schema(#[from] SchemaViolation),
}
