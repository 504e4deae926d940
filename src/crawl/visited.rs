// src/crawl/visited.rs
// =============================================================================
// The set of URLs a crawl has already claimed.
//
// Every crawl task shares one VisitedSet (through an Arc). Before a task
// fetches a page it calls insert(); only the task that actually adds the URL
// gets `true` back and goes on to fetch it. Everyone else stops right there.
//
// The check and the mark happen under the same lock, so two tasks racing on
// the same URL can never both win. That gives us "each page is fetched at
// most once", not just "usually once".
//
// Rust concepts:
// - Mutex: Only one thread at a time can touch the inner HashSet
// - Interior mutability: insert() takes &self, the Mutex hands out &mut
// =============================================================================

use parking_lot::Mutex;
use std::collections::HashSet;

/// A concurrency-safe, grow-only set of visited URLs.
///
/// There is no remove: once a URL is in, it stays in for the whole crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty set. One per top-level crawl.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `url` has been inserted before.
    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().contains(url)
    }

    /// Marks `url` as visited.
    ///
    /// Returns `true` if this call added it, `false` if it was already there.
    /// Inserting the same URL twice is harmless.
    pub fn insert(&self, url: &str) -> bool {
        let mut urls = self.urls.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Number of distinct URLs marked so far.
    pub fn len(&self) -> usize {
        self.urls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why parking_lot::Mutex instead of std::sync::Mutex?
//    - std's lock() returns a Result because a panicking thread can
//      "poison" the lock
//    - parking_lot's lock() just returns the guard, no unwrap needed
//
// 2. Where is the unlock?
//    - lock() returns a guard; the lock is released when the guard is dropped
//    - In contains() the guard is a temporary, dropped at the end of the line
//
// 3. Why check contains() before insert() inside insert()?
//    - HashSet::insert needs an owned String
//    - Checking first means we only allocate for URLs we haven't seen
// -----------------------------------------------------------------------------
