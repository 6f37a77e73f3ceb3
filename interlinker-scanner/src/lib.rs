pub mod category;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod normalize;
pub mod result;
pub mod sitemap;

pub use category::{CategoryFilter, PageCategory};
pub use config::ScanConfig;
pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetch::Fetcher;
pub use result::{Hyperlink, Page};
pub use sitemap::SitemapResolver;
