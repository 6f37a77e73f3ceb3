// URL discovery: sitemaps first, falling back to a full crawl

use crate::error::Result;
use crate::interlink::validate_homepage;
use interlinker_scanner::normalize::same_host;
use interlinker_scanner::{Crawler, Fetcher, ProgressCallback, ScanConfig, SitemapResolver};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverySource {
    Sitemap,
    Crawl,
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverySource::Sitemap => f.write_str("sitemap"),
            DiscoverySource::Crawl => f.write_str("crawl"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub home_url: String,
    pub source: DiscoverySource,
    pub urls: Vec<String>,
}

pub struct UrlDiscovery {
    resolver: SitemapResolver,
    crawler: Crawler,
}

impl UrlDiscovery {
    pub fn new(resolver: SitemapResolver, crawler: Crawler) -> Self {
        Self { resolver, crawler }
    }

    /// Both stages share one connection pool; the fallback crawl uses the
    /// discovery budget rather than the category crawl budget.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config)?;
        let resolver = SitemapResolver::new(fetcher.clone(), config);
        let crawler = Crawler::new(fetcher, config).with_page_budget(config.discovery_budget);
        Ok(Self::new(resolver, crawler))
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.crawler = self.crawler.with_progress_callback(callback);
        self
    }

    /// Every same-host URL of the site.
    ///
    /// Sitemap results are returned untouched when there are any; otherwise
    /// the crawled URLs are returned sorted.
    pub async fn discover(&self, home_url: &str) -> Result<DiscoveryReport> {
        let home_url = validate_homepage(home_url)?;

        let urls = self.resolver.resolve(&home_url).await;
        if !urls.is_empty() {
            info!("Using {} sitemap URLs for {}", urls.len(), home_url);
            return Ok(DiscoveryReport {
                home_url,
                source: DiscoverySource::Sitemap,
                urls,
            });
        }

        info!("No sitemap URLs for {}, falling back to crawl", home_url);
        let mut urls: Vec<String> = self
            .crawler
            .crawl_urls(&home_url)
            .await
            .into_iter()
            .filter(|url| same_host(url, &home_url))
            .collect();
        urls.sort();
        urls.dedup();

        Ok(DiscoveryReport {
            home_url,
            source: DiscoverySource::Crawl,
            urls,
        })
    }
}
