use std::time::Duration;

use biascheck_core::error::BiasError;
use biascheck_core::models::Provider;
use biascheck_core::traits::Transport;
use reqwest::Client;

use crate::providers::{ClaudeClient, GeminiClient, OpenAiClient, claude, gemini, openai};

const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoints and models for the three providers.
///
/// Defaults point at the public APIs; tests swap the base URLs for a mock server.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub openai_base_url: String,
    pub openai_model: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub claude_base_url: String,
    pub claude_model: String,
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            openai_model: openai::DEFAULT_MODEL.to_string(),
            gemini_base_url: gemini::DEFAULT_BASE_URL.to_string(),
            gemini_model: gemini::DEFAULT_MODEL.to_string(),
            claude_base_url: claude::DEFAULT_BASE_URL.to_string(),
            claude_model: claude::DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

impl HttpTransportConfig {
    /// Point every provider at the same base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.openai_base_url = base_url.to_string();
        self.gemini_base_url = base_url.to_string();
        self.claude_base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// [`Transport`] over HTTPS to OpenAI, Gemini or Claude.
///
/// The three clients share one connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    openai: OpenAiClient,
    gemini: GeminiClient,
    claude: ClaudeClient,
}

impl HttpTransport {
    pub fn new() -> Result<Self, BiasError> {
        Self::with_config(HttpTransportConfig::default())
    }

    pub fn with_config(config: HttpTransportConfig) -> Result<Self, BiasError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BiasError::HttpError(e.to_string()))?;
        let timeout_secs = config.timeout.as_secs();

        Ok(Self {
            openai: OpenAiClient::new(
                client.clone(),
                &config.openai_base_url,
                &config.openai_model,
                timeout_secs,
            ),
            gemini: GeminiClient::new(
                client.clone(),
                &config.gemini_base_url,
                &config.gemini_model,
                timeout_secs,
            ),
            claude: ClaudeClient::new(
                client,
                &config.claude_base_url,
                &config.claude_model,
                timeout_secs,
            ),
        })
    }
}

impl Transport for HttpTransport {
    async fn complete(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, BiasError> {
        match provider {
            Provider::OpenAi => self.openai.complete(api_key, prompt).await,
            Provider::Gemini => self.gemini.complete(api_key, prompt).await,
            Provider::Claude => self.claude.complete(api_key, prompt).await,
        }
    }
}
