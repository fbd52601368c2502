pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod prompt;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use analyze::{PageAnalyzer, PageOutcome};
pub use classify::Classifier;
pub use config::{Credentials, ProviderConfig};
pub use error::BiasError;
pub use models::{BiasDistribution, BiasRecord, Provider};
pub use normalize::normalize;
pub use traits::{ArticleExtractor, Fetcher, Transport};
