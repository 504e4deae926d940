// src/fetch/http.rs
// =============================================================================
// A Fetcher that downloads real web pages.
//
// How it works:
// 1. GET the URL (with a timeout, following up to 5 redirects)
// 2. Anything other than a 2xx status is an error
// 3. Parse the HTML and collect every <a href> on the page
// 4. Resolve relative links against the final (post-redirect) page URL,
//    keep only http(s)
// 5. Optionally drop links that leave the starting domain
//
// There's no delay between requests and no retry. If a page fails, the
// crawler just reports it and moves on.
//
// Rust concepts:
// - reqwest::Client: Cheap to share, pools connections internally
// - Option<String>: The domain filter is either set or not
// - Url::join: Turns "/docs" into "https://example.com/docs"
// =============================================================================

use super::{FetchError, Fetcher, Page};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Fetches pages over HTTP and extracts their links.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    // When set, only links on this domain are returned as neighbors
    domain: Option<String>,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            domain: None,
        })
    }

    /// Only follow links that stay on the same domain as `start_url`.
    pub fn same_domain_as(mut self, start_url: &str) -> Result<Self, FetchError> {
        let start = parse_url(start_url)?;
        let domain = start.domain().ok_or_else(|| FetchError::InvalidUrl {
            url: start_url.to_string(),
            reason: "URL has no domain".to_string(),
        })?;

        self.domain = Some(domain.to_string());
        Ok(self)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let base = parse_url(url)?;

        let response = self.client.get(base.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Relative links are relative to where redirects landed us
        let final_url = response.url().clone();

        let html = response.text().await?;
        let urls = extract_links(&html, &final_url, self.domain.as_deref());

        Ok(Page::new(html, urls))
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

// Collects the absolute http(s) targets of every <a href> in `html`,
// in document order. Duplicates are kept; the crawler dedups on its own.
fn extract_links(html: &str, base: &Url, domain: Option<&str>) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .filter(|link| match domain {
            Some(domain) => link.domain() == Some(domain),
            None => true,
        })
        .map(String::from)
        .collect()
}

// Resolves a (possibly relative) link to an absolute http(s) URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does the ? do on send().await?
//    - send() returns Result<Response, reqwest::Error>
//    - FetchError has #[from] reqwest::Error, so ? converts it automatically
//
// 2. Why .map(String::from) at the end?
//    - Url implements Into<String>, so String::from works as a function
//    - The crawler deals in plain Strings, not Url values
//
// 3. Why keep duplicate links?
//    - A page may link to the same place twice
//    - The visited set already makes the second one a no-op
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::{Html as HtmlResponse, Redirect};
    use axum::routing::get;
    use axum::Router;

    // Serves a tiny site on a random local port, returns its base URL
    async fn serve_site() -> String {
        let app = Router::new()
            .route(
                "/",
                get(|| async { HtmlResponse(r#"<a href="/docs">Docs</a><a href="/missing">Gone</a>"#) }),
            )
            .route("/docs", get(|| async { Redirect::permanent("/docs/") }))
            .route(
                "/docs/",
                get(|| async { HtmlResponse(r#"<p>Docs</p><a href="intro.html">Intro</a>"#) }),
            )
            .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "nope") }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn base() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let result = resolve_link(&base(), "https://other.com");
        assert_eq!(result.map(String::from), Some("https://other.com/".to_string()));
    }

    #[test]
    fn test_resolve_relative_link() {
        let result = resolve_link(&base(), "/docs");
        assert_eq!(result.map(String::from), Some("https://example.com/docs".to_string()));
    }

    #[test]
    fn test_skip_anchor() {
        assert_eq!(resolve_link(&base(), "#section"), None);
    }

    #[test]
    fn test_skip_mailto() {
        assert_eq!(resolve_link(&base(), "mailto:test@example.com"), None);
    }

    #[test]
    fn test_skip_non_http_scheme() {
        assert_eq!(resolve_link(&base(), "ftp://example.com/file"), None);
    }

    #[test]
    fn test_extract_links_in_order_with_duplicates() {
        let html = r##"
            <html><body>
                <a href="/a">A</a>
                <a href="https://other.com/b">B</a>
                <a href="#top">Top</a>
                <a href="/a">A again</a>
                <a>No href</a>
            </body></html>
        "##;

        let links = extract_links(html, &base(), None);
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://other.com/b",
                "https://example.com/a",
            ]
        );
    }

    #[test]
    fn test_extract_links_same_domain_only() {
        let html = r#"<a href="/a">A</a><a href="https://other.com/b">B</a>"#;
        let links = extract_links(html, &base(), Some("example.com"));
        assert_eq!(links, vec!["https://example.com/a"]);
    }

    #[test]
    fn test_same_domain_as_rejects_bad_url() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.same_domain_as("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_an_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("::nope::").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_and_links() {
        let base = serve_site().await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();

        let page = fetcher.fetch(&format!("{}/", base)).await.unwrap();

        assert!(page.body.contains("Docs"));
        assert_eq!(
            page.urls,
            vec![format!("{}/docs", base), format!("{}/missing", base)]
        );
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_status_error() {
        let base = serve_site().await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();

        let err = fetcher.fetch(&format!("{}/missing", base)).await.unwrap_err();

        match err {
            FetchError::Status { url, status } => {
                assert_eq!(url, format!("{}/missing", base));
                assert_eq!(status, 404);
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_relative_links_resolve_after_redirect() {
        let base = serve_site().await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();

        // /docs redirects to /docs/, so intro.html lives under /docs/
        let page = fetcher.fetch(&format!("{}/docs", base)).await.unwrap();

        assert_eq!(page.urls, vec![format!("{}/docs/intro.html", base)]);
    }
}
