use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use biascheck_core::{BiasError, BiasRecord, Credentials, ProviderConfig};

/// Message stored when a page has no article body.
pub const NO_ARTICLE_MESSAGE: &str = "記事が見つかりません";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClassifyRequest {
    /// Extracted article text.
    pub text: String,
    /// Page the text came from.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    /// Rendered page HTML.
    pub html: String,
    pub url: String,
}

/// Settings update in the options-page layout.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    /// `openai`, `gemini` or `claude`.
    pub api_provider: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default)]
    pub claude_api_key: String,
}

impl From<UpdateConfigRequest> for ProviderConfig {
    fn from(req: UpdateConfigRequest) -> Self {
        ProviderConfig::new(
            req.api_provider,
            Credentials {
                openai_api_key: req.openai_api_key,
                gemini_api_key: req.gemini_api_key,
                claude_api_key: req.claude_api_key,
            },
        )
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ClearRequest {
    #[serde(default)]
    pub url: String,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Latest outcome for the page the user is looking at.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoredResult {
    Scored {
        left: f64,
        center: f64,
        right: f64,
        url: String,
        timestamp: DateTime<Utc>,
    },
    Failed {
        message: String,
        url: String,
        timestamp: DateTime<Utc>,
    },
    Cleared {
        message: String,
        url: String,
        timestamp: DateTime<Utc>,
    },
}

impl StoredResult {
    pub fn failed(url: &str, err: &BiasError) -> Self {
        StoredResult::Failed {
            message: err.to_string(),
            url: url.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn cleared(url: &str) -> Self {
        StoredResult::Cleared {
            message: NO_ARTICLE_MESSAGE.to_string(),
            url: url.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            StoredResult::Scored { url, .. }
            | StoredResult::Failed { url, .. }
            | StoredResult::Cleared { url, .. } => url,
        }
    }
}

impl From<BiasRecord> for StoredResult {
    fn from(record: BiasRecord) -> Self {
        StoredResult::Scored {
            left: record.distribution.left,
            center: record.distribution.center,
            right: record.distribution.right,
            url: record.url,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ClearResponse {
    pub cleared: bool,
}

/// What the content side needs to know before extracting; never includes keys.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub has_api_key: bool,
    pub provider: String,
    pub config_loaded: bool,
}

impl From<&ProviderConfig> for ConfigResponse {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            has_api_key: config.has_api_key(),
            provider: config.provider.clone(),
            config_loaded: true,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
