use biascheck_core::error::BiasError;
use biascheck_core::models::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{MAX_REPLY_TOKENS, check_status, read_json, reply_text, send_error};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat Completions client.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(client: Client, base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    /// `POST {base}/chat/completions`, reply at `choices[0].message.content`.
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, BiasError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::info!(model = %self.model, "Calling OpenAI");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            max_tokens: MAX_REPLY_TOKENS,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(Provider::OpenAi, e, self.timeout_secs))?;

        let response = check_status(Provider::OpenAi, response).await?;
        let chat: ChatResponse = read_json(Provider::OpenAi, response).await?;

        let content = chat.choices.into_iter().next().and_then(|c| c.message.content);
        reply_text(Provider::OpenAi, content)
    }
}
