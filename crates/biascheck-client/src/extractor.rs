use std::sync::{Arc, LazyLock};

use biascheck_core::error::BiasError;
use biascheck_core::traits::ArticleExtractor;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Article body selectors, most site-specific first. The first one that
/// yields enough qualifying paragraphs wins.
pub const DEFAULT_SELECTORS: &[&str] = &[
    // Site-specific body containers
    ".articledetail-body p",
    ".article-body p",
    ".main-text p",
    ".article_body p",
    ".ArticleText p",
    ".article-txt p",
    ".p-main-contents p",
    ".JSID_key_article_body p",
    ".body-text p",
    ".content--detail-body p",
    ".yjDirectSLinkTarget p",
    // Attribute-substring conventions
    "article[class*=\"article\"] p",
    "article[class*=\"content\"] p",
    "article[class*=\"body\"] p",
    "[class*=\"article-body\"] p",
    "[class*=\"article-content\"] p",
    "[class*=\"entry-content\"] p",
    "[class*=\"post-content\"] p",
    "[class*=\"news-body\"] p",
    "[class*=\"story-body\"] p",
    "[class*=\"article_body\"] p",
    "[class*=\"articleBody\"] p",
    ".article-text p",
    ".article_text p",
    // Generic
    "article p",
    "main article p",
    "main p",
    ".content p",
    "#content p",
];

/// Minimum paragraph length on the selector path.
pub const MIN_PARAGRAPH_CHARS: usize = 30;
/// Minimum paragraph length on the all-paragraphs fallback.
pub const MIN_FALLBACK_PARAGRAPH_CHARS: usize = 50;
/// Paragraphs a selector must yield to be accepted.
pub const MIN_PARAGRAPHS: usize = 3;

/// Ads, sponsor blocks, related-article and ranking widgets, copyright lines,
/// press releases.
static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:広告|PR|スポンサー|関連記事|おすすめ|人気記事|ランキング|copyright|©|\[AD\]|プレスリリース)",
    )
    .expect("boilerplate pattern is valid")
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("`p` is a valid selector"));

/// Heuristic article-text extractor over `scraper`'s HTML tree.
///
/// Walks an ordered selector list and keeps the paragraphs of the first
/// selector that produces at least three that are long enough and not
/// boilerplate. If none does, every `<p>` of 50+ characters on the page is
/// used instead; the boilerplate filter is not applied there.
#[derive(Clone)]
pub struct SelectorExtractor {
    selectors: Arc<Vec<(String, Selector)>>,
}

impl SelectorExtractor {
    /// Extractor with the built-in selector list.
    pub fn new() -> Result<Self, BiasError> {
        Self::with_selectors::<&str>(&[])
    }

    /// Extractor that tries `extra` selectors before the built-in list.
    pub fn with_selectors<S: AsRef<str>>(extra: &[S]) -> Result<Self, BiasError> {
        let selectors = extra
            .iter()
            .map(AsRef::as_ref)
            .chain(DEFAULT_SELECTORS.iter().copied())
            .map(|raw| {
                Selector::parse(raw)
                    .map(|sel| (raw.to_string(), sel))
                    .map_err(|e| BiasError::InvalidSelector {
                        selector: raw.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            selectors: Arc::new(selectors),
        })
    }

    /// Extract from an already parsed document.
    pub fn extract_document(&self, doc: &Html) -> String {
        for (raw, selector) in self.selectors.iter() {
            let mut matched = doc.select(selector).peekable();
            if matched.peek().is_none() {
                continue;
            }

            let paragraphs: Vec<String> = matched
                .map(element_text)
                .filter(|text| is_article_paragraph(text))
                .collect();

            if paragraphs.len() >= MIN_PARAGRAPHS {
                tracing::debug!(selector = %raw, paragraphs = paragraphs.len(), "Selector matched");
                return paragraphs.join("\n");
            }
        }

        let paragraphs: Vec<String> = doc
            .select(&PARAGRAPH)
            .map(element_text)
            .filter(|text| text.chars().count() >= MIN_FALLBACK_PARAGRAPH_CHARS)
            .collect();
        tracing::debug!(
            paragraphs = paragraphs.len(),
            "No selector matched, using all paragraphs"
        );

        paragraphs.join("\n")
    }
}

impl ArticleExtractor for SelectorExtractor {
    fn extract(&self, html: &str) -> String {
        let doc = Html::parse_document(html);
        self.extract_document(&doc)
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn is_article_paragraph(text: &str) -> bool {
    text.chars().count() >= MIN_PARAGRAPH_CHARS && !BOILERPLATE.is_match(text)
}
