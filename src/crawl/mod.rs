// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Concurrent crawling: every discovered link gets its own task
// - Configurable depth limit
// - Each URL is fetched at most once, even when many tasks race for it
// - A failed page only ends its own branch
//
// Submodules:
// - visited: VisitedSet, the shared "already seen" record
// - traverse: crawl() and the recursive traverse() behind it
// =============================================================================

mod traverse;
mod visited;

pub use traverse::{crawl, traverse, CrawlSummary};
pub use visited::VisitedSet;
