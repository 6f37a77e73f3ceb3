//! Sitemap discovery: robots.txt and well-known paths, nested indexes and
//! gzipped documents, flattened into a list of same-host page URLs.

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::fetch::{FetchResponse, Fetcher};
use crate::normalize::{resolve_and_strip, same_host};
use flate2::read::GzDecoder;
use std::collections::{HashSet, VecDeque};
use std::io::{self, Read};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Paths tried on every site, in this order, before robots.txt entries.
pub const SITEMAP_CANDIDATES: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemap/sitemap.xml",
];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Uncompressed size cap for a single sitemap, matching the sitemap protocol's 50 MiB limit.
pub const MAX_SITEMAP_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<sitemapindex>`: every `<loc>` is another sitemap.
    Index,
    /// Anything else is read as a `<urlset>` of page URLs.
    UrlSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub kind: SitemapKind,
    pub locs: Vec<String>,
}

/// Values of every `Sitemap:` directive in a robots.txt body.
pub fn parse_robots_sitemaps(robots_txt: &str) -> Vec<String> {
    robots_txt
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if !line.to_ascii_lowercase().starts_with("sitemap:") {
                return None;
            }
            let (_, value) = line.split_once(':')?;
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}

/// Parses a sitemap document, ignoring namespaces on every tag.
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument> {
    let xml = xml.trim_start_matches('\u{feff}').trim_start();
    let document = roxmltree::Document::parse_with_options(
        xml,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )?;

    let kind = if document
        .root_element()
        .tag_name()
        .name()
        .eq_ignore_ascii_case("sitemapindex")
    {
        SitemapKind::Index
    } else {
        SitemapKind::UrlSet
    };

    let locs = document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "loc")
        .filter_map(|node| node.text())
        .map(str::trim)
        .filter(|loc| !loc.is_empty())
        .map(str::to_string)
        .collect();

    Ok(SitemapDocument { kind, locs })
}

/// Sitemap body as text, gunzipping when the URL or content type says gzip.
///
/// A body flagged as gzip without the gzip magic bytes was already decoded in
/// transit and is used as-is.
pub fn decode_payload(url: &str, response: &FetchResponse) -> Result<String> {
    let flagged = url.to_ascii_lowercase().ends_with(".gz") || response.is_gzip();
    if flagged && response.body.starts_with(&GZIP_MAGIC) {
        let bytes = gunzip(&response.body, MAX_SITEMAP_BYTES)?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(response.text())
}

fn gunzip(body: &[u8], limit: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    GzDecoder::new(body)
        .take(limit + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(ScanError::Decompress(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("gzip payload exceeds {} bytes", limit),
        )));
    }
    Ok(bytes)
}

pub struct SitemapResolver {
    fetcher: Fetcher,
    visit_limit: usize,
    timeout: Duration,
}

impl SitemapResolver {
    pub fn new(fetcher: Fetcher, config: &ScanConfig) -> Self {
        Self {
            fetcher,
            visit_limit: config.sitemap_visit_limit,
            timeout: config.sitemap_timeout,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Ok(Self::new(Fetcher::new(config)?, config))
    }

    pub fn with_visit_limit(mut self, limit: usize) -> Self {
        self.visit_limit = limit;
        self
    }

    /// Flattens every sitemap reachable from `home_url` into same-host page
    /// URLs, in first-discovery order and without duplicates.
    ///
    /// Unreachable or malformed sitemaps are skipped; a site without any
    /// yields an empty list.
    pub async fn resolve(&self, home_url: &str) -> Vec<String> {
        let candidates = match self.candidate_sitemaps(home_url).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Cannot resolve sitemaps for {}: {}", home_url, e);
                return Vec::new();
            }
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        for candidate in candidates {
            if seen.insert(candidate.clone()) {
                queue.push_back(candidate);
            }
        }

        let mut collected: HashSet<String> = HashSet::new();
        let mut pages: Vec<String> = Vec::new();

        while let Some(sitemap_url) = queue.pop_front() {
            if pages.len() >= self.visit_limit {
                break;
            }

            let document = match self.fetch_sitemap(&sitemap_url).await {
                Ok(document) => document,
                Err(ScanError::Status { status, .. }) => {
                    debug!("Sitemap {} returned {}", sitemap_url, status);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping sitemap {}: {}", sitemap_url, e);
                    continue;
                }
            };

            match document.kind {
                SitemapKind::Index => {
                    debug!(
                        "Sitemap index {} lists {} sitemaps",
                        sitemap_url,
                        document.locs.len()
                    );
                    for loc in document.locs {
                        if seen.insert(loc.clone()) {
                            queue.push_back(loc);
                        }
                    }
                }
                SitemapKind::UrlSet => {
                    debug!("Sitemap {} lists {} URLs", sitemap_url, document.locs.len());
                    for loc in document.locs {
                        if pages.len() >= self.visit_limit {
                            break;
                        }
                        let Some(page_url) = resolve_and_strip(home_url, &loc) else {
                            continue;
                        };
                        if same_host(&page_url, home_url) && collected.insert(page_url.clone()) {
                            pages.push(page_url);
                        }
                    }
                }
            }
        }

        info!("Resolved {} URLs from sitemaps of {}", pages.len(), home_url);
        pages
    }

    /// Well-known sitemap paths followed by robots.txt `Sitemap:` entries.
    async fn candidate_sitemaps(&self, home_url: &str) -> Result<Vec<String>> {
        let base = Url::parse(home_url.trim())
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", home_url, e)))?;

        let mut candidates = Vec::new();
        for path in SITEMAP_CANDIDATES {
            if let Ok(url) = base.join(path) {
                candidates.push(url.to_string());
            }
        }

        if let Ok(robots_url) = base.join("/robots.txt") {
            match self.fetcher.fetch(robots_url.as_str(), self.timeout).await {
                Ok(response) => {
                    let declared = parse_robots_sitemaps(&response.text());
                    debug!("robots.txt declares {} sitemaps", declared.len());
                    candidates.extend(declared);
                }
                Err(e) => debug!("No robots.txt at {}: {}", robots_url, e),
            }
        }

        Ok(candidates)
    }

    async fn fetch_sitemap(&self, sitemap_url: &str) -> Result<SitemapDocument> {
        let response = self.fetcher.fetch(sitemap_url, self.timeout).await?;
        let xml = decode_payload(sitemap_url, &response)?;
        parse_sitemap(&xml)
    }
}
