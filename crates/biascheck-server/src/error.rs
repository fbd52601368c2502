use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use biascheck_core::BiasError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `BiasError`.
pub struct ApiError(pub BiasError);

impl From<BiasError> for ApiError {
    fn from(err: BiasError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_and_type(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            BiasError::ShortInput { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "short_input"),
            BiasError::MissingCredential(_) => (StatusCode::BAD_REQUEST, "missing_credential"),
            BiasError::UnsupportedProvider(_) => (StatusCode::BAD_REQUEST, "unsupported_provider"),
            BiasError::InvalidSelector { .. } => (StatusCode::BAD_REQUEST, "invalid_selector"),
            BiasError::TransportFailure { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
            BiasError::MalformedReply(_) => (StatusCode::BAD_GATEWAY, "malformed_reply"),
            BiasError::HttpError(_) => (StatusCode::BAD_GATEWAY, "http_error"),
            BiasError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            BiasError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.0.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
