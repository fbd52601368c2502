use biascheck_core::error::BiasError;
use biascheck_core::models::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{MAX_REPLY_TOKENS, check_status, read_json, reply_text, send_error};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// `generateContent` client. The API key travels as the `key` query parameter.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

// ---- Gemini API types ----

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: &str, model: &str, timeout_secs: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout_secs,
        }
    }

    fn endpoint(&self, api_key: &str) -> Result<Url, BiasError> {
        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        ))
        .map_err(|e| BiasError::ConfigError(format!("Invalid Gemini base URL: {e}")))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// `POST {base}/models/{model}:generateContent?key=…`,
    /// reply at `candidates[0].content.parts[0].text`.
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, BiasError> {
        let url = self.endpoint(api_key)?;
        tracing::info!(model = %self.model, "Calling Gemini");

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_REPLY_TOKENS,
            },
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| send_error(Provider::Gemini, e, self.timeout_secs))?;

        let response = check_status(Provider::Gemini, response).await?;
        let generated: GenerateResponse = read_json(Provider::Gemini, response).await?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);
        reply_text(Provider::Gemini, text)
    }
}
