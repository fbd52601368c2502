pub mod extractor;
pub mod fetcher;
pub mod providers;
pub mod transport;

pub use extractor::SelectorExtractor;
pub use fetcher::ReqwestFetcher;
pub use transport::{HttpTransport, HttpTransportConfig};
