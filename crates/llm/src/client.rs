use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicClient {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self::with_api_url(DEFAULT_API_URL.to_string(), api_key)
    }

    /// Point the client at a different endpoint, e.g. a local mock in tests.
    pub fn with_api_url(api_url: String, api_key: String) -> Self {
        Self {
            api_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Send a single user prompt and return the concatenated text blocks of
    /// the reply, trimmed.
    pub async fn complete(&self, model: &str, max_tokens: u32, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic")?;

        if !response.status().is_success() {
            anyhow::bail!("Anthropic request failed: {}", response.status());
        }

        let body: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic response")?;

        let text: String = body.content.into_iter().map(|block| block.text).collect();
        Ok(text.trim().to_string())
    }
}
