//! Wire formats of the three classification providers.
//!
//! Each client sends one request and returns the reply text, trimmed. Error
//! handling is shared: non-2xx responses become `TransportFailure` carrying
//! the provider's own `error.message` when the body has one.

pub mod claude;
pub mod gemini;
pub mod openai;

use biascheck_core::error::BiasError;
use biascheck_core::models::Provider;
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Response-token cap for every provider; the reply is a three-field object.
pub const MAX_REPLY_TOKENS: u32 = 100;

/// `{"error": {"message": "..."}}`, the error envelope all three providers use.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Map a failed `send()` to a pipeline error.
pub(crate) fn send_error(provider: Provider, err: reqwest::Error, timeout_secs: u64) -> BiasError {
    if err.is_timeout() {
        BiasError::Timeout(timeout_secs)
    } else if err.is_connect() {
        BiasError::TransportFailure {
            status: None,
            message: format!("{} connection failed: {err}", provider.display_name()),
        }
    } else {
        BiasError::TransportFailure {
            status: None,
            message: format!("{} request failed: {err}", provider.display_name()),
        }
    }
}

/// Check the status; on failure, consume the body and build a `TransportFailure`.
pub(crate) async fn check_status(
    provider: Provider,
    response: Response,
) -> Result<Response, BiasError> {
    let status = response.status();
    tracing::debug!(%provider, status = status.as_u16(), "Provider response status");

    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(provider, status_code, &body);
    tracing::warn!(
        %provider,
        status = status_code,
        message = %message,
        "Provider returned an error"
    );

    Err(BiasError::TransportFailure {
        status: Some(status_code),
        message,
    })
}

/// Provider's embedded error message, or a generic one naming the status code.
pub(crate) fn error_message(provider: Provider, status_code: u16, body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("{} API error: {status_code}", provider.display_name()))
}

/// Parse a success body; an unexpected shape is a malformed reply.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    response: Response,
) -> Result<T, BiasError> {
    let body = response.text().await.map_err(|e| BiasError::TransportFailure {
        status: None,
        message: format!("Failed to read {} response: {e}", provider.display_name()),
    })?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!(%provider, error = %e, "Unexpected response shape");
        BiasError::MalformedReply(provider.display_name().to_string())
    })
}

/// Trim the reply text; absent or blank text is a malformed reply.
pub(crate) fn reply_text(provider: Provider, text: Option<String>) -> Result<String, BiasError> {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BiasError::MalformedReply(provider.display_name().to_string()))
}
