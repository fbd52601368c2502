use std::future::Future;

use crate::error::BiasError;
use crate::models::Provider;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, BiasError>> + Send;
}

/// Turns a rendered HTML document into candidate article text.
///
/// Implementations must not perform I/O. An empty string means no article
/// text was found.
pub trait ArticleExtractor: Send + Sync + Clone {
    fn extract(&self, html: &str) -> String;
}

/// Sends a prompt to one of the remote classification services.
///
/// Returns the provider's reply text, trimmed. Exactly one outbound request
/// per call, no retries.
pub trait Transport: Send + Sync + Clone {
    fn complete(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, BiasError>> + Send;
}
