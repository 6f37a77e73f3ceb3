use crate::category::CategoryFilter;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::extractor::extract_links;
use crate::fetch::Fetcher;
use crate::normalize::{canonical_url, strip_trailing_slash};
use crate::result::{Hyperlink, Page};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Called with the number of pages visited so far and the page being fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Receives every page a traversal visits, in visit order.
pub trait CrawlAccumulator {
    /// `accepted` tells whether the page's own URL passed the category filter.
    fn record(&mut self, url: String, links: Vec<Hyperlink>, accepted: bool);
}

/// Keeps the pages that belong to the crawled category.
#[derive(Debug, Default)]
pub struct PageCollector {
    pages: Vec<Page>,
}

impl PageCollector {
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

impl CrawlAccumulator for PageCollector {
    fn record(&mut self, url: String, links: Vec<Hyperlink>, accepted: bool) {
        if accepted {
            self.pages.push(Page::new(url, links));
        }
    }
}

/// Keeps every visited URL and drops the links.
#[derive(Debug, Default)]
pub struct UrlCollector {
    urls: Vec<String>,
}

impl UrlCollector {
    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

impl CrawlAccumulator for UrlCollector {
    fn record(&mut self, url: String, _links: Vec<Hyperlink>, _accepted: bool) {
        self.urls.push(url);
    }
}

/// Breadth-first frontier owned by a single traversal.
///
/// Membership is tracked by `canonical_url`, so `home` and `home/` are one page.
#[derive(Debug, Default)]
struct Frontier {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
}

impl Frontier {
    fn seeded(url: String) -> Self {
        let mut frontier = Self::default();
        frontier.push(&url);
        frontier
    }

    fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&canonical_url(&url));
        Some(url)
    }

    /// Marks `url` visited; false if it already was.
    fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(canonical_url(url))
    }

    /// Queues `url` unless it is visited or already waiting.
    fn push(&mut self, url: &str) -> bool {
        let key = canonical_url(url);
        if self.visited.contains(&key) || self.queued.contains(&key) {
            return false;
        }
        self.queued.insert(key);
        self.queue.push_back(url.to_string());
        true
    }

    fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

pub struct Crawler {
    fetcher: Fetcher,
    page_budget: usize,
    page_timeout: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: Fetcher, config: &ScanConfig) -> Self {
        Self {
            fetcher,
            page_budget: config.page_budget,
            page_timeout: config.page_timeout,
            progress_callback: None,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Ok(Self::new(Fetcher::new(config)?, config))
    }

    pub fn with_page_budget(mut self, budget: usize) -> Self {
        self.page_budget = budget;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawls from `home_url`, returning the pages whose URL passes `filter`.
    pub async fn crawl(&self, home_url: &str, filter: &CategoryFilter) -> Vec<Page> {
        let mut collector = PageCollector::default();
        self.traverse(home_url, filter, &mut collector).await;
        collector.into_pages()
    }

    /// Crawls every reachable page and returns the visited URLs in visit order.
    pub async fn crawl_urls(&self, home_url: &str) -> Vec<String> {
        let mut collector = UrlCollector::default();
        self.traverse(home_url, &CategoryFilter::AllPages, &mut collector)
            .await;
        collector.into_urls()
    }

    /// Breadth-first traversal shared by every crawl flavour.
    ///
    /// Stops when the frontier empties or `page_budget` pages were visited, and
    /// returns the number of visited pages.
    pub async fn traverse<A: CrawlAccumulator>(
        &self,
        home_url: &str,
        filter: &CategoryFilter,
        accumulator: &mut A,
    ) -> usize {
        let start_url = strip_trailing_slash(home_url).to_string();
        info!(
            "Starting crawl of {} (budget {} pages, filter {:?})",
            start_url, self.page_budget, filter
        );

        let mut frontier = Frontier::seeded(start_url);

        while frontier.visited_count() < self.page_budget {
            let Some(url) = frontier.pop() else {
                break;
            };
            if !frontier.mark_visited(&url) {
                continue;
            }

            if let Some(ref callback) = self.progress_callback {
                callback(frontier.visited_count(), url.clone());
            }

            let links = extract_links(&self.fetcher, &url, self.page_timeout).await;
            debug!("{} yielded {} same-host links", url, links.len());

            for link in &links {
                if filter.accepts(&link.target_url) && frontier.push(&link.target_url) {
                    debug!("  -> Queued {}", link.target_url);
                }
            }

            let accepted = filter.accepts(&url);
            accumulator.record(url, links, accepted);
        }

        info!("Crawl complete. Visited {} pages", frontier.visited_count());
        frontier.visited_count()
    }
}
