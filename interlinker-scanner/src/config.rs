use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Pages visited by a category crawl before it stops.
pub const DEFAULT_PAGE_BUDGET: usize = 300;
/// Pages visited by the fallback crawl of URL discovery.
pub const DEFAULT_DISCOVERY_BUDGET: usize = 500;
/// Page URLs collected from sitemaps before resolution stops.
pub const DEFAULT_SITEMAP_VISIT_LIMIT: usize = 30_000;

/// Settings shared by the fetcher, crawler and sitemap resolver.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub page_timeout: Duration,
    pub sitemap_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_redirects: usize,
    pub page_budget: usize,
    pub discovery_budget: usize,
    pub sitemap_visit_limit: usize,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            page_timeout: Duration::from_secs(15),
            sitemap_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            page_budget: DEFAULT_PAGE_BUDGET,
            discovery_budget: DEFAULT_DISCOVERY_BUDGET,
            sitemap_visit_limit: DEFAULT_SITEMAP_VISIT_LIMIT,
        }
    }

    /// Sets the page timeout; sitemap fetches get five seconds more.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.page_timeout = Duration::from_secs(secs);
        self.sitemap_timeout = Duration::from_secs(secs + 5);
        self.connect_timeout = Duration::from_secs((secs / 2).max(1));
        self
    }

    pub fn with_page_budget(mut self, budget: usize) -> Self {
        self.page_budget = budget;
        self
    }

    pub fn with_discovery_budget(mut self, budget: usize) -> Self {
        self.discovery_budget = budget;
        self
    }

    pub fn with_sitemap_visit_limit(mut self, limit: usize) -> Self {
        self.sitemap_visit_limit = limit;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}
