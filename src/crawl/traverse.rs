// src/crawl/traverse.rs
// =============================================================================
// The crawler itself: a recursive, parallel, depth-first walk over links.
//
// How one call works:
// 1. Out of depth? Stop.
// 2. Try to claim the URL in the shared VisitedSet. Already claimed? Stop.
// 3. Fetch the page. Failed? Report the error and stop (this branch only).
// 4. Report the page.
// 5. Spawn one task per outbound link, each with one less depth.
// 6. Wait for every one of those tasks before returning.
//
// Step 6 is what makes the top-level call "done" only when the whole
// reachable graph (within the depth limit) has been fetched and reported.
//
// Step 2 is what keeps cycles (A -> B -> A) from looping and keeps two
// sibling tasks from fetching the same page.
//
// Rust concepts:
// - Arc: Shared ownership across tasks (the set, the fetcher, the reporter)
// - tokio::task::JoinSet: A group of spawned tasks we can wait on together
// - BoxFuture: An async fn can't call itself directly, its future would have
//   infinite size. Boxing the future gives it a fixed size.
// =============================================================================

use super::VisitedSet;
use crate::fetch::Fetcher;
use crate::report::Reporter;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::task::JoinSet;

/// What a finished crawl looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Distinct URLs the crawl claimed (fetched, successfully or not)
    pub visited: usize,
}

/// Crawls from `start_url`, following links up to `depth` levels.
///
/// Depth 1 fetches only the start page, depth 2 also fetches the pages it
/// links to, and so on. A depth of 0 or less fetches nothing.
///
/// Every outcome goes to `reporter`. Returns once all work is finished.
pub async fn crawl(
    start_url: &str,
    depth: i32,
    fetcher: Arc<dyn Fetcher>,
    reporter: Arc<dyn Reporter>,
) -> CrawlSummary {
    let visited = Arc::new(VisitedSet::new());

    traverse(
        start_url.to_string(),
        depth,
        fetcher,
        Arc::clone(&visited),
        reporter,
    )
    .await;

    CrawlSummary {
        visited: visited.len(),
    }
}

/// Fetches `url` (if allowed) and everything reachable from it within `depth`.
///
/// `visited` may be shared with other traversals running at the same time;
/// a URL claimed by any of them is skipped here.
pub fn traverse(
    url: String,
    depth: i32,
    fetcher: Arc<dyn Fetcher>,
    visited: Arc<VisitedSet>,
    reporter: Arc<dyn Reporter>,
) -> BoxFuture<'static, ()> {
    async move {
        if depth <= 0 {
            return;
        }

        // insert() is check-and-mark under one lock: exactly one racer wins
        if !visited.insert(&url) {
            log::debug!("skipping {} (already visited)", url);
            return;
        }

        let page = match fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                reporter.failed(&url, &e);
                return;
            }
        };

        reporter.found(&url, &page.body);

        let mut children = JoinSet::new();
        for next in page.urls {
            children.spawn(traverse(
                next,
                depth - 1,
                Arc::clone(&fetcher),
                Arc::clone(&visited),
                Arc::clone(&reporter),
            ));
        }

        // Parent finishes only after every child has
        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                log::error!("crawl task below {} did not finish: {}", url, e);
            }
        }
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::spawn (through JoinSet) instead of join_all?
//    - join_all runs the futures concurrently, but on one task
//    - spawn hands each child to the runtime, so on the multi-threaded
//      runtime siblings really do run in parallel
//
// 2. What happens if a child task panics?
//    - The panic stays inside that task
//    - join_next() gives us Err(JoinError), we log it and keep waiting
//      for the others
//
// 3. Why is the visited check before the fetch, not after?
//    - So a sibling racing toward the same URL sees the mark right away
//    - Otherwise both would fetch while the first is still waiting on I/O
//
// 4. Why Arc<dyn Fetcher> instead of a generic F: Fetcher?
//    - The same crawl code works with FakeFetcher and HttpFetcher
//    - main picks one at runtime based on the subcommand
// -----------------------------------------------------------------------------
