use std::time::Duration;

use biascheck_client::{HttpTransport, SelectorExtractor};
use biascheck_core::{PageAnalyzer, ProviderConfig};
use tokio::sync::RwLock;

use crate::dto::StoredResult;

/// Deadline the server puts on a single classification.
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub analyzer: PageAnalyzer<SelectorExtractor, HttpTransport>,
    /// Live settings; replaced by `PUT /v1/config`, copied per request.
    pub config: RwLock<ProviderConfig>,
    /// Most recent outcome, replaced on every classify/analyze/clear.
    pub latest: RwLock<Option<StoredResult>>,
    /// Bearer token protecting `/v1/*` (None = open).
    pub api_token: Option<String>,
    pub classify_timeout: Duration,
}

impl AppState {
    pub fn new(
        analyzer: PageAnalyzer<SelectorExtractor, HttpTransport>,
        config: ProviderConfig,
    ) -> Self {
        Self {
            analyzer,
            config: RwLock::new(config),
            latest: RwLock::new(None),
            api_token: None,
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_classify_timeout(mut self, timeout: Duration) -> Self {
        self.classify_timeout = timeout;
        self
    }

    /// Copy of the current settings, so a classification never sees a
    /// half-applied update.
    pub async fn config_snapshot(&self) -> ProviderConfig {
        self.config.read().await.clone()
    }

    pub async fn replace_config(&self, config: ProviderConfig) {
        tracing::info!(
            provider = %config.provider,
            has_api_key = config.has_api_key(),
            "Settings updated"
        );
        *self.config.write().await = config;
    }

    pub async fn store(&self, result: StoredResult) {
        tracing::debug!(url = %result.url(), "Storing latest result");
        *self.latest.write().await = Some(result);
    }
}
