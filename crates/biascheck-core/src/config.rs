use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BiasError;
use crate::models::Provider;

const DEFAULT_PROVIDER: &str = "openai";

/// API keys per provider. Empty string means "not configured".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub openai_api_key: String,
    pub gemini_api_key: String,
    pub claude_api_key: String,
}

impl Credentials {
    pub fn key_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Gemini => &self.gemini_api_key,
            Provider::Claude => &self.claude_api_key,
        }
    }

    pub fn has_any(&self) -> bool {
        Provider::ALL.iter().any(|p| !self.key_for(*p).is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai", &!self.openai_api_key.is_empty())
            .field("gemini", &!self.gemini_api_key.is_empty())
            .field("claude", &!self.claude_api_key.is_empty())
            .finish()
    }
}

/// Provider selection plus credentials, as kept by the extension's settings store.
///
/// The provider is kept as the raw settings tag; it is only resolved to a
/// [`Provider`] when a classification runs, so an unknown tag surfaces as
/// [`BiasError::UnsupportedProvider`] at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(rename = "apiProvider", default = "default_provider")]
    pub provider: String,
    #[serde(flatten)]
    pub credentials: Credentials,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            credentials: Credentials::default(),
        }
    }
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            provider: provider.into(),
            credentials,
        }
    }

    /// Shorthand for a config with a single provider and key.
    pub fn single(provider: Provider, api_key: impl Into<String>) -> Self {
        let mut credentials = Credentials::default();
        let key = api_key.into();
        match provider {
            Provider::OpenAi => credentials.openai_api_key = key,
            Provider::Gemini => credentials.gemini_api_key = key,
            Provider::Claude => credentials.claude_api_key = key,
        }
        Self::new(provider.as_str(), credentials)
    }

    /// Read configuration from environment variables.
    ///
    /// - `BIASCHECK_PROVIDER` (optional, defaults to `openai`)
    /// - `OPENAI_API_KEY`, `GEMINI_API_KEY`, `CLAUDE_API_KEY` (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let provider = lookup("BIASCHECK_PROVIDER")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(default_provider);

        Self {
            provider,
            credentials: Credentials {
                openai_api_key: lookup("OPENAI_API_KEY").unwrap_or_default(),
                gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
                claude_api_key: lookup("CLAUDE_API_KEY").unwrap_or_default(),
            },
        }
    }

    /// Load the settings-store JSON layout
    /// (`apiProvider`, `openaiApiKey`, `geminiApiKey`, `claudeApiKey`).
    pub fn from_json_file(path: &Path) -> Result<Self, BiasError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BiasError::ConfigError(format!(
                "Failed to read settings file {}: {e}",
                path.display()
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            BiasError::ConfigError(format!(
                "Invalid settings file {}: {e}",
                path.display()
            ))
        })
    }

    /// Resolve the provider tag. Fails with `UnsupportedProvider` for unknown tags.
    pub fn resolve_provider(&self) -> Result<Provider, BiasError> {
        self.provider
            .parse()
            .map_err(|_| BiasError::UnsupportedProvider(self.provider.clone()))
    }

    pub fn has_api_key(&self) -> bool {
        self.credentials.has_any()
    }

    /// Check a settings update before it replaces the live configuration.
    ///
    /// Keys are trimmed; the selected provider must be known and have a key.
    /// Keys for the other providers may stay empty.
    pub fn validated(mut self) -> Result<Self, BiasError> {
        let creds = &mut self.credentials;
        for key in [
            &mut creds.openai_api_key,
            &mut creds.gemini_api_key,
            &mut creds.claude_api_key,
        ] {
            *key = key.trim().to_string();
        }

        let provider = self.resolve_provider()?;
        if self.credentials.key_for(provider).is_empty() {
            return Err(BiasError::MissingCredential(provider));
        }
        Ok(self)
    }
}
