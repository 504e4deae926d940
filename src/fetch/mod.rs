// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler gets a page: the Fetcher trait.
//
// The crawler itself doesn't care whether a page comes from the network or
// from a table in memory. It only needs something that, given a URL, returns
// the page body plus the URLs the page links to, or an error.
//
// Submodules:
// - fixture: FakeFetcher, answers from a fixed HashMap (used for tests/demo)
// - http: HttpFetcher, downloads real pages with reqwest
//
// Rust concepts:
// - Traits: Shared behavior across different types (like an interface)
// - async_trait: Lets a trait have async fns and still be used as dyn Fetcher
// - thiserror: Derives std::error::Error + Display for our error enum
// =============================================================================

mod fixture;
mod http;

pub use fixture::{FakeFetcher, FIXTURE_ROOT};
pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// What a successful fetch gives back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The page content
    pub body: String,
    /// Outbound links, in page order. Duplicates are allowed.
    pub urls: Vec<String>,
}

impl Page {
    pub fn new(body: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            body: body.into(),
            urls,
        }
    }
}

/// Why a page could not be fetched.
///
/// The crawler treats every variant the same way: report it and stop
/// exploring that branch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No such page
    #[error("not found: {0}")]
    NotFound(String),

    /// The URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered, but not with a 2xx
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection, DNS, TLS, timeout...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can turn a URL into a page.
///
/// Implementations must be safe to call from many tasks at once, which is
/// why the trait requires Send + Sync.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}
