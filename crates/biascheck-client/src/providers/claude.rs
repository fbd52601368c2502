use biascheck_core::error::BiasError;
use biascheck_core::models::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{MAX_REPLY_TOKENS, check_status, read_json, reply_text, send_error};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API client.
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

// ---- Anthropic API types ----

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl ClaudeClient {
    pub fn new(client: Client, base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    /// `POST {base}/messages`, reply at `content[0].text`.
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, BiasError> {
        let url = format!("{}/messages", self.base_url);
        tracing::info!(model = %self.model, "Calling Claude");

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_REPLY_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(Provider::Claude, e, self.timeout_secs))?;

        let response = check_status(Provider::Claude, response).await?;
        let messages: MessagesResponse = read_json(Provider::Claude, response).await?;

        let text = messages.content.into_iter().next().and_then(|b| b.text);
        reply_text(Provider::Claude, text)
    }
}
