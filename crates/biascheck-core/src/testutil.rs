//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. All mocks use
//! `Arc<Mutex<_>>` so clones share state and tests can assert on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::BiasError;
use crate::models::Provider;
use crate::traits::{ArticleExtractor, Fetcher, Transport};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued responses.
#[derive(Clone)]
pub struct MockFetcher {
    /// Each call pops the first element. If empty, returns a default page.
    responses: Arc<Mutex<Vec<Result<String, BiasError>>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Ok(html.to_string())])),
        }
    }

    pub fn with_error(error: BiasError) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![Err(error)])),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, BiasError> {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("<html><body></body></html>".to_string())
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that ignores the HTML and returns fixed text.
#[derive(Clone)]
pub struct MockExtractor {
    text: String,
}

impl MockExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }
}

impl ArticleExtractor for MockExtractor {
    fn extract(&self, _html: &str) -> String {
        self.text.clone()
    }
}

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// A call seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub provider: Provider,
    pub api_key: String,
    pub prompt: String,
}

/// Mock transport that returns queued replies and records every call.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<Vec<Result<String, BiasError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new(reply: &str) -> Self {
        Self::with_responses(vec![Ok(reply.to_string())])
    }

    pub fn with_error(error: BiasError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<String, BiasError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn complete(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, BiasError> {
        self.calls.lock().unwrap().push(RecordedCall {
            provider,
            api_key: api_key.to_string(),
            prompt: prompt.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(r#"{"left": 0.0, "center": 1.0, "right": 0.0}"#.to_string())
        } else {
            responses.remove(0)
        }
    }
}
