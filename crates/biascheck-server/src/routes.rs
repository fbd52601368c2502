use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use biascheck_core::{BiasError, PageOutcome, ProviderConfig};

use crate::auth::require_api_token;
use crate::dto::{
    AnalyzeRequest, ClassifyRequest, ClearRequest, ClearResponse, ConfigResponse, ErrorResponse,
    HealthResponse, StoredResult, UpdateConfigRequest,
};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/v1/classify", post(classify))
        .route("/v1/analyze", post(analyze))
        .route("/v1/clear", post(clear_result))
        .route("/v1/config", get(get_config).put(update_config))
        .route("/v1/result", get(get_result))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_token,
        ));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

/// Run `fut` under the server's classification deadline.
async fn with_deadline<T>(
    state: &AppState,
    fut: impl Future<Output = Result<T, BiasError>>,
) -> Result<T, BiasError> {
    match tokio::time::timeout(state.classify_timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(BiasError::Timeout(state.classify_timeout.as_secs())),
    }
}

fn log_failure(url: &str, err: &BiasError) {
    if err.is_precondition() {
        tracing::info!(url, error = %err, "Classification skipped");
    } else {
        tracing::warn!(url, error = %err, "Classification failed");
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/v1/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Bias distribution for the text", body = StoredResult),
        (status = 400, description = "Provider not usable", body = ErrorResponse),
        (status = 422, description = "Text too short", body = ErrorResponse),
        (status = 502, description = "Provider failed", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "classify"
)]
pub async fn classify(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ClassifyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let config = state.config_snapshot().await;
    tracing::info!(url = %body.url, chars = body.text.chars().count(), "Classify request");

    let classifier = state.analyzer.classifier();
    match with_deadline(&state, classifier.classify(&body.text, &config)).await {
        Ok(dist) => {
            let result = StoredResult::from(biascheck_core::BiasRecord::new(dist, body.url));
            state.store(result.clone()).await;
            Ok(axum::Json(result))
        }
        Err(err) => {
            log_failure(&body.url, &err);
            state.store(StoredResult::failed(&body.url, &err)).await;
            Err(ApiError(err))
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Scored or cleared result", body = StoredResult),
        (status = 204, description = "No API key configured; nothing analyzed or stored"),
        (status = 400, description = "Provider not usable", body = ErrorResponse),
        (status = 502, description = "Provider failed", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "classify"
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<AnalyzeRequest>,
) -> Result<Response, ApiError> {
    let config = state.config_snapshot().await;
    if !config.has_api_key() {
        tracing::info!(url = %body.url, "No API key configured, skipping analysis");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    tracing::info!(url = %body.url, bytes = body.html.len(), "Analyze request");

    let analysis = state.analyzer.analyze(&body.html, &body.url, &config);
    let result = match with_deadline(&state, analysis).await {
        Ok(PageOutcome::Scored(record)) => StoredResult::from(record),
        Ok(PageOutcome::NoArticle { url, .. }) => StoredResult::cleared(&url),
        Err(err) => {
            log_failure(&body.url, &err);
            state.store(StoredResult::failed(&body.url, &err)).await;
            return Err(ApiError(err));
        }
    };

    state.store(result.clone()).await;
    Ok(axum::Json(result).into_response())
}

#[utoipa::path(
    post,
    path = "/v1/clear",
    request_body = ClearRequest,
    responses(
        (status = 200, description = "Result cleared", body = ClearResponse),
    ),
    security(("bearer" = [])),
    tag = "classify"
)]
pub async fn clear_result(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<ClearRequest>,
) -> impl IntoResponse {
    tracing::info!(url = %body.url, "Clearing result");
    state.store(StoredResult::cleared(&body.url)).await;
    axum::Json(ClearResponse { cleared: true })
}

// ---------------------------------------------------------------------------
// Config & results
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/v1/config",
    responses(
        (status = 200, description = "Provider selection summary", body = ConfigResponse),
    ),
    security(("bearer" = [])),
    tag = "config"
)]
pub async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    axum::Json(ConfigResponse::from(&state.config_snapshot().await))
}

#[utoipa::path(
    put,
    path = "/v1/config",
    request_body = UpdateConfigRequest,
    responses(
        (status = 200, description = "Settings saved", body = ConfigResponse),
        (status = 400, description = "Unknown provider or its key is empty", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "config"
)]
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<UpdateConfigRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let config = ProviderConfig::from(body).validated()?;
    let response = ConfigResponse::from(&config);
    state.replace_config(config).await;
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/v1/result",
    responses(
        (status = 200, description = "Latest stored result", body = StoredResult),
        (status = 404, description = "Nothing stored yet", body = ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "classify"
)]
pub async fn get_result(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.latest.read().await.clone() {
        Some(result) => axum::Json(result).into_response(),
        None => {
            let body = ErrorResponse {
                error: "not_found".to_string(),
                message: "No result stored yet".to_string(),
            };
            (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    axum::Json(HealthResponse { status: "healthy" })
}
