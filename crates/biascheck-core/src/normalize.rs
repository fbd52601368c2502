use std::sync::LazyLock;

use regex::Regex;

use crate::error::BiasError;
use crate::models::BiasDistribution;

/// Shortest brace-delimited span. Providers often wrap the JSON in prose or
/// code fences; only the first object is considered.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*?\}").expect("JSON object pattern is valid"));

/// Turn a provider reply into a valid [`BiasDistribution`].
///
/// Missing or non-numeric fields count as 0, every field is clamped to
/// `[0, 1]`, and the triple is rescaled to sum to 1. An all-zero triple is
/// returned unchanged.
pub fn normalize(reply: &str, provider_name: &str) -> Result<BiasDistribution, BiasError> {
    let json = JSON_OBJECT
        .find(reply)
        .ok_or_else(|| BiasError::MalformedReply(provider_name.to_string()))?;

    let parsed: serde_json::Value = serde_json::from_str(json.as_str()).map_err(|e| {
        tracing::debug!(provider = provider_name, error = %e, "Reply JSON did not parse");
        BiasError::MalformedReply(provider_name.to_string())
    })?;

    let field = |name: &str| -> f64 {
        parsed
            .get(name)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    };

    let mut dist = BiasDistribution::new(field("left"), field("center"), field("right"));

    let total = dist.total();
    if total > 0.0 {
        dist.left /= total;
        dist.center /= total;
        dist.right /= total;
    }

    Ok(dist)
}
