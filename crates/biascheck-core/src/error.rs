use thiserror::Error;

use crate::models::Provider;

/// Error types for the extraction and classification pipeline.
///
/// Every variant is terminal for the attempt that produced it; nothing in the
/// core retries.
#[derive(Error, Debug)]
pub enum BiasError {
    /// Article text too short to be worth classifying.
    #[error("Article text is too short ({len} characters, need at least {min})")]
    ShortInput { len: usize, min: usize },

    /// The selected provider has no API key configured.
    #[error("{} API key is not configured", .0.display_name())]
    MissingCredential(Provider),

    /// The configured provider tag is not one of openai, gemini, claude.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// The provider answered with a non-success status, or could not be reached.
    #[error("{message}")]
    TransportFailure {
        /// `None` when the request never produced an HTTP response.
        status: Option<u16>,
        message: String,
    },

    /// The provider reply did not contain a usable JSON object.
    #[error("Could not parse the reply from {0}")]
    MalformedReply(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// A CSS selector given to the extractor could not be parsed.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Fetching a page failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BiasError {
    /// Returns true if the failure happened before any network call was made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BiasError::ShortInput { .. }
                | BiasError::MissingCredential(_)
                | BiasError::UnsupportedProvider(_)
        )
    }

    /// HTTP status reported by the provider, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            BiasError::TransportFailure { status, .. } => *status,
            _ => None,
        }
    }
}
