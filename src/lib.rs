// src/lib.rs
// =============================================================================
// graph-crawler as a library.
//
// - crawl: the concurrent, depth-bounded, deduplicating traversal
// - fetch: the Fetcher trait and its two implementations
// - report: where crawl outcomes are sent
//
// The binary (src/main.rs) is a thin CLI on top of these.
// =============================================================================

pub mod crawl;
pub mod fetch;
pub mod report;

pub use crawl::{crawl, traverse, CrawlSummary, VisitedSet};
pub use fetch::{FakeFetcher, FetchError, Fetcher, HttpFetcher, Page};
pub use report::{CollectingReporter, CrawlEvent, LogReporter, Reporter};
