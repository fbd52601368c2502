use crate::config::ProviderConfig;
use crate::error::BiasError;
use crate::models::BiasDistribution;
use crate::normalize::normalize;
use crate::prompt::build_prompt;
use crate::traits::Transport;

/// Inputs shorter than this (in characters) are rejected before any request.
pub const MIN_INPUT_CHARS: usize = 50;

/// Scores article text with the provider selected in a [`ProviderConfig`].
///
/// Stateless: the configuration is passed in on every call and never cached.
#[derive(Clone)]
pub struct Classifier<T: Transport> {
    transport: T,
}

impl<T: Transport> Classifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Classify `text` with the configured provider.
    ///
    /// 1. Reject short input
    /// 2. Resolve the provider tag
    /// 3. Look up its API key
    /// 4. Send rubric + first 4000 characters
    /// 5. Normalize the reply
    pub async fn classify(
        &self,
        text: &str,
        config: &ProviderConfig,
    ) -> Result<BiasDistribution, BiasError> {
        let len = text.chars().count();
        if len < MIN_INPUT_CHARS {
            return Err(BiasError::ShortInput {
                len,
                min: MIN_INPUT_CHARS,
            });
        }

        let provider = config.resolve_provider()?;
        let api_key = config.credentials.key_for(provider);
        if api_key.is_empty() {
            return Err(BiasError::MissingCredential(provider));
        }

        tracing::info!(%provider, chars = len, "Classifying article");

        let prompt = build_prompt(text);
        let reply = self.transport.complete(provider, api_key, &prompt).await?;
        tracing::debug!(%provider, reply = %reply, "Provider reply");

        let dist = normalize(&reply, provider.display_name())?;
        if dist.is_zero() {
            tracing::warn!(%provider, "Provider scored every side at zero");
        }
        tracing::info!(
            left = dist.left,
            center = dist.center,
            right = dist.right,
            "Classification complete"
        );

        Ok(dist)
    }
}
