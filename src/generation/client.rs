//! HTTP client for the generative model API

use serde::Deserialize;
use serde_json::json;

use super::error::GenerationError;

/// Environment variable holding the model API key
pub const API_KEY_ENV: &str = "STUDYKIT_API_KEY";

/// Seam for the single model call a generation request makes; lets tests
/// script responses without a network
pub trait TextCompletion {
    fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Blocking client for the model API
pub struct ModelClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl ModelClient {
    /// Model API base URL
    const API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    /// API version header value
    const API_VERSION: &'static str = "2023-06-01";
    const MODEL: &'static str = "claude-sonnet-4-5";
    const MAX_TOKENS: u32 = 4096;

    pub fn new(api_key: String) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self { client, api_key })
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| GenerationError::ApiKeyNotFound(API_KEY_ENV))?;
        Self::new(api_key)
    }
}

impl TextCompletion for ModelClient {
    fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = json!({
            "model": Self::MODEL,
            "max_tokens": Self::MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(Self::API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let message: MessageResponse = response.json()?;
        let text: String = message
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}
