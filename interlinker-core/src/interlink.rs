// Link matching: which crawled pages link to the operator's target URLs

use crate::error::{InterlinkError, Result};
use interlinker_scanner::normalize::{canonical_url, strip_trailing_slash};
use interlinker_scanner::{CategoryFilter, Crawler, Page};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;
use url::Url;

/// Target URLs in the order the operator first listed them.
///
/// Targets are shown as typed (minus trailing slashes) but looked up by
/// `canonical_url`, the same form crawled links are serialized in.
#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    targets: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TargetSet {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for target in targets {
            set.insert(target.as_ref());
        }
        set
    }

    /// Parses free text where targets are separated by commas or newlines.
    pub fn parse(text: &str) -> Self {
        Self::new(text.split([',', '\n']))
    }

    /// Adds a target; false when it is blank or already present.
    pub fn insert(&mut self, target: &str) -> bool {
        let display = strip_trailing_slash(target);
        if display.is_empty() {
            return false;
        }
        let key = canonical_url(display);
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.targets.len());
        self.targets.push(display.to_string());
        true
    }

    pub fn position(&self, url: &str) -> Option<usize> {
        self.positions.get(&canonical_url(url)).copied()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.position(url).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A page linking to a target, with the text of that link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMatch {
    pub page_url: String,
    pub anchor_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMatches {
    pub target: String,
    pub matches: Vec<LinkMatch>,
}

/// One bucket per target, in target order; unmatched targets keep an empty bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub targets: Vec<TargetMatches>,
}

impl MatchResult {
    pub fn get(&self, target: &str) -> Option<&[LinkMatch]> {
        let key = canonical_url(target);
        self.targets
            .iter()
            .find(|bucket| canonical_url(&bucket.target) == key)
            .map(|bucket| bucket.matches.as_slice())
    }

    pub fn total_matches(&self) -> usize {
        self.targets.iter().map(|bucket| bucket.matches.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlinkReport {
    pub home_url: String,
    pub category: String,
    pub pages_crawled: usize,
    pub results: MatchResult,
}

/// Scans every link of every page once and buckets those pointing at a target.
pub fn match_links(pages: &[Page], targets: &TargetSet) -> MatchResult {
    let mut buckets: Vec<TargetMatches> = targets
        .iter()
        .map(|target| TargetMatches {
            target: target.to_string(),
            matches: Vec::new(),
        })
        .collect();

    for page in pages {
        for link in &page.outbound_links {
            if let Some(position) = targets.position(&link.target_url) {
                buckets[position].matches.push(LinkMatch {
                    page_url: page.url.clone(),
                    anchor_text: link.anchor_text.clone(),
                });
            }
        }
    }

    MatchResult { targets: buckets }
}

/// Checks the homepage is an absolute http(s) URL and returns it trimmed.
pub fn validate_homepage(home_url: &str) -> Result<String> {
    let home_url = home_url.trim();
    if home_url.is_empty() {
        return Err(InterlinkError::MissingHomepage);
    }

    match Url::parse(home_url) {
        Ok(parsed)
            if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() =>
        {
            Ok(home_url.to_string())
        }
        _ => Err(InterlinkError::InvalidHomepage(home_url.to_string())),
    }
}

/// Crawls the category from `home_url` and reports which pages link to each target.
pub async fn find_interlinks(
    crawler: &Crawler,
    home_url: &str,
    filter: &CategoryFilter,
    targets: &TargetSet,
) -> Result<InterlinkReport> {
    let home_url = validate_homepage(home_url)?;
    if targets.is_empty() {
        return Err(InterlinkError::NoTargets);
    }

    info!(
        "Checking {} target(s) against {} of {}",
        targets.len(),
        filter,
        home_url
    );

    let pages = crawler.crawl(&home_url, filter).await;
    let results = match_links(&pages, targets);

    info!(
        "Found {} link(s) to targets across {} crawled pages",
        results.total_matches(),
        pages.len()
    );

    Ok(InterlinkReport {
        home_url,
        category: filter.to_string(),
        pages_crawled: pages.len(),
        results,
    })
}
