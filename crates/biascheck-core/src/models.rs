use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote text-classification services the pipeline can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Claude,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Gemini, Provider::Claude];

    /// Settings tag, as stored by the extension (`openai`, `gemini`, `claude`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
        }
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
            Provider::Claude => "Claude",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "gemini" => Ok(Provider::Gemini),
            "claude" => Ok(Provider::Claude),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// Political-lean proportions of an article.
///
/// Each component lies in `[0, 1]`. A distribution produced from a successful
/// classification sums to 1.0, except the all-zero triple returned when the
/// provider scored every component 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BiasDistribution {
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

impl BiasDistribution {
    pub fn new(left: f64, center: f64, right: f64) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    pub fn total(&self) -> f64 {
        self.left + self.center + self.right
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }
}

/// A distribution tagged with the page it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasRecord {
    #[serde(flatten)]
    pub distribution: BiasDistribution,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

impl BiasRecord {
    pub fn new(distribution: BiasDistribution, url: impl Into<String>) -> Self {
        Self {
            distribution,
            url: url.into(),
            timestamp: Utc::now(),
        }
    }
}
