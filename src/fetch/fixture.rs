// src/fetch/fixture.rs
// =============================================================================
// A Fetcher that never touches the network.
//
// FakeFetcher answers from a HashMap of URL -> Page. Any URL that isn't in the
// table is "not found". This makes crawls completely deterministic, which is
// exactly what we want for tests and for the `fixture` subcommand.
//
// FakeFetcher::golang() builds the small four-page site the demo crawls:
//
//   golang.org/         -> pkg/, cmd/
//   golang.org/pkg/     -> golang.org/, cmd/, pkg/fmt/, pkg/os/
//   golang.org/pkg/fmt/ -> golang.org/, pkg/
//   golang.org/pkg/os/  -> golang.org/, pkg/
//
// cmd/ is linked to but has no entry, so fetching it fails.
// =============================================================================

use super::{FetchError, Fetcher, Page};
use async_trait::async_trait;
use std::collections::HashMap;

/// Start URL of the canned fixture site
pub const FIXTURE_ROOT: &str = "https://golang.org/";

/// A Fetcher backed by a fixed table of pages.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Page>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a page. Builder style, so tables read top to bottom.
    pub fn with_page(mut self, url: &str, body: &str, urls: &[&str]) -> Self {
        let urls = urls.iter().map(|u| u.to_string()).collect();
        self.pages.insert(url.to_string(), Page::new(body, urls));
        self
    }

    /// The canned four-page site.
    pub fn golang() -> Self {
        Self::new()
            .with_page(
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .with_page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .with_page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_known_page() {
        let fetcher = FakeFetcher::golang();
        let page = fetcher.fetch(FIXTURE_ROOT).await.unwrap();
        assert_eq!(page.body, "The Go Programming Language");
        assert_eq!(
            page.urls,
            vec!["https://golang.org/pkg/", "https://golang.org/cmd/"]
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_page() {
        let fetcher = FakeFetcher::golang();
        let err = fetcher.fetch("https://golang.org/cmd/").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref u) if u == "https://golang.org/cmd/"));
        assert_eq!(err.to_string(), "not found: https://golang.org/cmd/");
    }

    #[test]
    fn test_golang_fixture_has_four_pages() {
        assert_eq!(FakeFetcher::golang().len(), 4);
        assert!(FakeFetcher::new().is_empty());
    }
}
