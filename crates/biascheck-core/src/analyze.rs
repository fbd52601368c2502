use crate::classify::Classifier;
use crate::config::ProviderConfig;
use crate::error::BiasError;
use crate::models::BiasRecord;
use crate::traits::{ArticleExtractor, Fetcher, Transport};

/// Pages whose extracted text is not longer than this are treated as having no article.
pub const MIN_ARTICLE_CHARS: usize = 100;

/// Result of analyzing one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// An article was found and scored.
    Scored(BiasRecord),
    /// Not enough article text on the page; nothing was sent to a provider.
    NoArticle { url: String, chars: usize },
}

/// Runs the page pipeline: extract → classify → tag with url and timestamp.
///
/// Generic over the extractor and transport so tests can run without HTML
/// parsing or network calls.
#[derive(Clone)]
pub struct PageAnalyzer<E, T>
where
    E: ArticleExtractor,
    T: Transport,
{
    extractor: E,
    classifier: Classifier<T>,
}

impl<E, T> PageAnalyzer<E, T>
where
    E: ArticleExtractor,
    T: Transport,
{
    pub fn new(extractor: E, transport: T) -> Self {
        Self {
            extractor,
            classifier: Classifier::new(transport),
        }
    }

    pub fn classifier(&self) -> &Classifier<T> {
        &self.classifier
    }

    pub async fn analyze(
        &self,
        html: &str,
        url: &str,
        config: &ProviderConfig,
    ) -> Result<PageOutcome, BiasError> {
        let text = self.extractor.extract(html);
        let chars = text.chars().count();
        tracing::info!(url, chars, "Extracted article text");

        if chars <= MIN_ARTICLE_CHARS {
            tracing::info!(url, "No article body found");
            return Ok(PageOutcome::NoArticle {
                url: url.to_string(),
                chars,
            });
        }

        let distribution = self.classifier.classify(&text, config).await?;
        Ok(PageOutcome::Scored(BiasRecord::new(distribution, url)))
    }

    /// Download `url` with `fetcher`, then [`analyze`](Self::analyze) it.
    pub async fn analyze_url<F: Fetcher>(
        &self,
        fetcher: &F,
        url: &str,
        config: &ProviderConfig,
    ) -> Result<PageOutcome, BiasError> {
        tracing::info!("Fetching {}", url);
        let html = fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        self.analyze(&html, url, config).await
    }
}
