use crate::fetch::Fetcher;
use crate::normalize::{is_fetchable_link, resolve_and_strip, same_host};
use crate::result::Hyperlink;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Fetches `page_url` and returns its same-host links.
///
/// Any fetch failure yields an empty list; a single bad page never stops a crawl.
pub async fn extract_links(fetcher: &Fetcher, page_url: &str, timeout: Duration) -> Vec<Hyperlink> {
    match fetcher.fetch(page_url, timeout).await {
        Ok(response) => parse_links(&response.text(), page_url),
        Err(e) => {
            debug!("No links from {}: {}", page_url, e);
            Vec::new()
        }
    }
}

/// Extracts same-host, fragment-free links from an HTML document.
pub fn parse_links(html: &str, page_url: &str) -> Vec<Hyperlink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_fetchable_link(href) {
            continue;
        }
        let Some(absolute_url) = resolve_and_strip(page_url, href) else {
            continue;
        };
        if !same_host(&absolute_url, page_url) {
            debug!("  -> Cross-host link {}, skipping", absolute_url);
            continue;
        }

        let text: String = element.text().collect();
        let anchor_text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        links.push(Hyperlink::new(absolute_url, anchor_text));
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const PAGE: &str = "https://www.example.com/blog/post";

    #[test]
    fn test_parse_links_filters_and_resolves() {
        let html = r##"<html><body>
            <a href="/about#team">  About
                us </a>
            <a href="https://example.com/contact">Contact</a>
            <a href="https://other.com/page">Elsewhere</a>
            <a href="mailto:hi@example.com">Mail</a>
            <a href="tel:123">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="#comments">Comments</a>
            <a href="relative-page">Relative</a>
            <a href="/img"><img src="x.png"></a>
            <a>No href</a>
        </body></html>"##;

        let links = parse_links(html, PAGE);

        assert_eq!(
            links,
            vec![
                Hyperlink::new("https://www.example.com/about", "About us"),
                Hyperlink::new("https://example.com/contact", "Contact"),
                Hyperlink::new("https://www.example.com/img", ""),
            ]
        );
    }

    #[test]
    fn test_parse_links_tolerates_malformed_markup() {
        let html = r#"<div><a href="/one">One</a><p>unclosed <b>bold <a href="/two">Two</a></div></span><a href="/three">Three"#;
        let links = parse_links(html, PAGE);
        let urls: Vec<&str> = links.iter().map(|l| l.target_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.example.com/one",
                "https://www.example.com/two",
                "https://www.example.com/three",
            ]
        );
    }

    #[test]
    fn test_parse_links_nested_text() {
        let html = r#"<a href="/x"><span>Read</span> <b>more</b></a>"#;
        let links = parse_links(html, PAGE);
        assert_eq!(links[0].anchor_text, "Read more");
    }

    #[tokio::test]
    async fn test_extract_links_from_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(r#"<a href="/page1">Page 1</a>"#.as_bytes()),
            )
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&ScanConfig::default()).unwrap();
        let links = extract_links(&fetcher, &mock_server.uri(), Duration::from_secs(5)).await;

        assert_eq!(
            links,
            vec![Hyperlink::new(format!("{}/page1", mock_server.uri()), "Page 1")]
        );
    }

    #[tokio::test]
    async fn test_extract_links_absorbs_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let fetcher = Fetcher::new(&ScanConfig::default()).unwrap();
        let links = extract_links(
            &fetcher,
            &format!("{}/down", mock_server.uri()),
            Duration::from_secs(5),
        )
        .await;

        assert!(links.is_empty());
    }
}
