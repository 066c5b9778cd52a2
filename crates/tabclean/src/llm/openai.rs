//! OpenAI chat completions provider.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{Result, TabCleanError};

use super::prompts;
use super::provider::{DatasetSummary, LlmConfig, LlmProvider};

/// OpenAI API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Request timeout for a single completion.
const TIMEOUT_SECS: u64 = 60;

/// OpenAI GPT provider.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new OpenAI provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| TabCleanError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(LlmConfig::default())
    }

    /// Create from the environment with custom configuration.
    pub fn from_env_with_config(config: LlmConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            TabCleanError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        if api_key.trim().is_empty() {
            return Err(TabCleanError::Config(
                "OPENAI_API_KEY environment variable is empty".to_string(),
            ));
        }
        Self::with_config(api_key, config)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| TabCleanError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Send a message to the OpenAI API.
    fn send_message(&self, user_prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        debug!(model = %self.config.model, "requesting completion");
        let response = self
            .client
            .post(API_URL)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| TabCleanError::Llm(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(TabCleanError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OpenAIResponse = response
            .json()
            .map_err(|e| TabCleanError::Llm(format!("Failed to parse API response: {}", e)))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TabCleanError::Llm("No response from OpenAI".to_string()))
    }
}

impl LlmProvider for OpenAIProvider {
    fn suggest_cleaning(&self, summary: &DatasetSummary) -> Result<String> {
        let prompt = prompts::cleaning_prompt(summary)?;
        self.send_message(&prompt)
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// OpenAI API response structure.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}
