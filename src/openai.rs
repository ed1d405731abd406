//! OpenAI client configuration with sensible defaults.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Timeout for OpenAI API requests (5 minutes).
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with a request timeout to prevent hung API calls.
///
/// The API key is read from `OPENAI_API_KEY`; credential checks happen in
/// preflight, not here.
pub fn create_client() -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}
