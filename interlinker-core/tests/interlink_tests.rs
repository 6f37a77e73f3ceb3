// Tests for the link-match engine against a mock site

use interlinker_core::{InterlinkError, LinkMatch, TargetSet, find_interlinks};
use interlinker_scanner::{CategoryFilter, Crawler, PageCategory, ScanConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(html.into_bytes()),
        )
        .mount(server)
        .await;
}

fn crawler() -> Crawler {
    Crawler::from_config(&ScanConfig::default().with_timeout_secs(5)).unwrap()
}

fn link_match(page_url: String, anchor_text: &str) -> LinkMatch {
    LinkMatch {
        page_url,
        anchor_text: anchor_text.to_string(),
    }
}

// ============================================================================
// Category crawl + matching
// ============================================================================

#[tokio::test]
async fn test_find_interlinks_only_scans_category_pages() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        format!(
            r#"<a href="{b}/blog/a">Read A</a><a href="{b}/blog/b">Read B</a>
               <a href="{b}/target">Home link</a>"#,
            b = base
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/blog/a",
        format!(
            r#"<a href="/target/">Go</a><a href="{b}/blog/b">Next</a>"#,
            b = base
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/blog/b",
        format!(
            r##"<a href="{b}/target#top"><img src="t.png"></a><a href="/blog/a">Prev</a>"##,
            b = base
        ),
    )
    .await;

    let targets = TargetSet::new([format!("{}/target", base), format!("{}/target/", base)]);
    let report = find_interlinks(
        &crawler(),
        &base,
        &PageCategory::BlogPages.filter(),
        &targets,
    )
    .await
    .unwrap();

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.results.targets.len(), 1, "x and x/ share one bucket");
    assert_eq!(
        report.results.get(&format!("{}/target", base)).unwrap(),
        &[
            link_match(format!("{}/blog/a", base), "Go"),
            link_match(format!("{}/blog/b", base), ""),
        ][..]
    );
}

#[tokio::test]
async fn test_find_interlinks_page_does_not_match_itself() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_html(&mock_server, "/", String::from(r#"<a href="/a">Start</a>"#)).await;
    mount_html(&mock_server, "/a", String::from(r#"<a href="/b">Go</a>"#)).await;
    mount_html(&mock_server, "/b", String::from(r#"<a href="/a"></a>"#)).await;

    let target = format!("{}/b", base);
    let report = find_interlinks(
        &crawler(),
        &base,
        &CategoryFilter::AllPages,
        &TargetSet::new([target.as_str()]),
    )
    .await
    .unwrap();

    assert_eq!(
        report.results.get(&target).unwrap(),
        &[link_match(format!("{}/a", base), "Go")][..]
    );
}

#[tokio::test]
async fn test_unmatched_target_has_empty_bucket() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_html(&mock_server, "/", String::from("<p>nothing here</p>")).await;

    let report = find_interlinks(
        &crawler(),
        &base,
        &CategoryFilter::AllPages,
        &TargetSet::parse("https://nowhere.example/x, https://nowhere.example/y"),
    )
    .await
    .unwrap();

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.results.targets.len(), 2);
    assert!(report.results.targets.iter().all(|t| t.matches.is_empty()));
    assert_eq!(report.results.total_matches(), 0);
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_no_targets_is_rejected_before_crawling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = find_interlinks(
        &crawler(),
        &mock_server.uri(),
        &CategoryFilter::AllPages,
        &TargetSet::parse(" , \n "),
    )
    .await;

    assert!(matches!(result, Err(InterlinkError::NoTargets)));
}

#[tokio::test]
async fn test_missing_homepage_is_rejected() {
    let result = find_interlinks(
        &crawler(),
        "",
        &CategoryFilter::AllPages,
        &TargetSet::new(["https://example.com/x"]),
    )
    .await;

    assert!(matches!(result, Err(InterlinkError::MissingHomepage)));
}

#[tokio::test]
async fn test_logo_link_does_not_duplicate_homepage_matches() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(r#"<a href="/">Logo</a><a href="/x">X</a>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_html(&mock_server, "/x", String::from("<p>leaf</p>")).await;

    let target = format!("{}/x", base);
    let report = find_interlinks(
        &crawler(),
        &base,
        &CategoryFilter::AllPages,
        &TargetSet::new([target.as_str()]),
    )
    .await
    .unwrap();

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(
        report.results.get(&target).unwrap(),
        &[link_match(base.clone(), "X")][..]
    );
}
