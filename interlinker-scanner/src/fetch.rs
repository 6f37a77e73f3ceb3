use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;

/// A successful (status 200, non-empty) response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_gzip(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("gzip"))
            .unwrap_or(false)
    }
}

/// Blocking-per-call HTTP access with the fixed browser-like header set.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&config.accept_language)?);

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url`, treating anything but a non-empty 200 response as an error.
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchResponse> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).timeout(timeout).send().await?;

        let status_code = response.status().as_u16();
        if status_code != 200 {
            return Err(ScanError::Status {
                url: url.to_string(),
                status: status_code,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response.bytes().await?.to_vec();
        if body.is_empty() {
            return Err(ScanError::EmptyBody(url.to_string()));
        }

        Ok(FetchResponse {
            status_code,
            content_type,
            body,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ScanError::Client(format!("invalid header value {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, header_exists, method, path},
    };

    fn fetcher() -> Fetcher {
        Fetcher::new(&ScanConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header_exists("user-agent"))
            .and(header("accept-language", "en-US,en;q=0.9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html></html>"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = fetcher()
            .fetch(&format!("{}/page", mock_server.uri()), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.content_type.as_deref(), Some("text/html"));
        assert_eq!(response.text(), "<html></html>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = fetcher()
            .fetch(&format!("{}/broken", mock_server.uri()), Duration::from_secs(5))
            .await;

        assert!(matches!(result, Err(ScanError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let result = fetcher()
            .fetch(&format!("{}/empty", mock_server.uri()), Duration::from_secs(5))
            .await;

        assert!(matches!(result, Err(ScanError::EmptyBody(_))));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"moved"))
            .mount(&mock_server)
            .await;

        let response = fetcher()
            .fetch(&format!("{}/old", mock_server.uri()), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(response.text(), "moved");
    }

    #[test]
    fn test_is_gzip() {
        let response = FetchResponse {
            status_code: 200,
            content_type: Some("Application/X-Gzip".to_string()),
            body: vec![1],
        };
        assert!(response.is_gzip());

        let plain = FetchResponse {
            content_type: Some("application/xml".to_string()),
            ..response
        };
        assert!(!plain.is_gzip());
    }
}
