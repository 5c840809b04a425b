//! Error types for the content generation API integration

use thiserror::Error;

/// Errors that can occur when generating content from a document
#[derive(Debug, Error)]
pub enum GenerationError {
    /// API key is not configured
    #[error("Model API key not configured. Set the {0} environment variable")]
    ApiKeyNotFound(&'static str),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("Model API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The model returned no usable text
    #[error("Model returned no usable content")]
    EmptyResponse,

    /// No JSON array could be found in the model text
    #[error("Could not find a JSON array in the model response")]
    MissingJsonArray,

    /// JSON deserialization error
    #[error("Malformed model JSON: {0}")]
    Json(#[from] serde_json::Error),
}
