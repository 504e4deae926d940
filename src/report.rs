// src/report.rs
// =============================================================================
// Where crawl results go.
//
// The crawler calls a Reporter once per page it tried to fetch:
// - found(url, body) when the fetch worked
// - failed(url, error) when it didn't
//
// Two implementations:
// - LogReporter: writes each event through the `log` macros as it happens,
//   remembering only how many pages worked and how many failed
// - CollectingReporter: keeps every event in a Vec so main can print a
//   table or JSON at the end (and so tests can inspect them)
//
// Reporters are called from many tasks at once, so they must be Send + Sync.
// =============================================================================

use crate::fetch::FetchError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives the outcome of every fetch the crawler makes.
pub trait Reporter: Send + Sync {
    fn found(&self, url: &str, body: &str);
    fn failed(&self, url: &str, error: &FetchError);
}

/// One reported outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrawlEvent {
    Found { url: String, body: String },
    Failed { url: String, error: String },
}

impl CrawlEvent {
    pub fn url(&self) -> &str {
        match self {
            CrawlEvent::Found { url, .. } | CrawlEvent::Failed { url, .. } => url,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CrawlEvent::Found { .. })
    }
}

/// Logs every event as soon as it is reported, keeping only counts.
#[derive(Debug, Default)]
pub struct LogReporter {
    found: AtomicUsize,
    failed: AtomicUsize,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found_count(&self) -> usize {
        self.found.load(Ordering::Relaxed)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

impl Reporter for LogReporter {
    fn found(&self, url: &str, body: &str) {
        self.found.fetch_add(1, Ordering::Relaxed);
        log::info!("found: {} {:?}", url, preview(body, 80));
    }

    fn failed(&self, url: &str, error: &FetchError) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        log::warn!("failed: {}: {}", url, error);
    }
}

/// Records every event; also logs them at debug level.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<CrawlEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, in arrival order.
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events.lock().clone()
    }

    /// URLs that were fetched successfully.
    pub fn successes(&self) -> Vec<String> {
        self.urls_where(|e| e.is_ok())
    }

    /// URLs whose fetch failed.
    pub fn failures(&self) -> Vec<String> {
        self.urls_where(|e| !e.is_ok())
    }

    fn urls_where(&self, keep: impl Fn(&CrawlEvent) -> bool) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|e| keep(e))
            .map(|e| e.url().to_string())
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn found(&self, url: &str, body: &str) {
        log::debug!("found: {}", url);
        self.events.lock().push(CrawlEvent::Found {
            url: url.to_string(),
            body: body.to_string(),
        });
    }

    fn failed(&self, url: &str, error: &FetchError) {
        log::debug!("failed: {}: {}", url, error);
        self.events.lock().push(CrawlEvent::Failed {
            url: url.to_string(),
            error: error.to_string(),
        });
    }
}

/// Shortens `text` to at most `max` characters for display, on a char boundary.
pub fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_splits_outcomes() {
        let reporter = CollectingReporter::new();
        reporter.found("https://a/", "A");
        reporter.failed("https://b/", &FetchError::NotFound("https://b/".to_string()));
        reporter.found("https://c/", "C");

        assert_eq!(reporter.successes(), vec!["https://a/", "https://c/"]);
        assert_eq!(reporter.failures(), vec!["https://b/"]);
        assert_eq!(
            reporter.events()[1],
            CrawlEvent::Failed {
                url: "https://b/".to_string(),
                error: "not found: https://b/".to_string(),
            }
        );
    }

    #[test]
    fn test_log_reporter_counts() {
        let reporter = LogReporter::new();
        reporter.found("https://a/", "A");
        reporter.found("https://b/", "B");
        reporter.failed("https://c/", &FetchError::NotFound("https://c/".to_string()));

        assert_eq!(reporter.found_count(), 2);
        assert_eq!(reporter.failed_count(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let event = CrawlEvent::Found {
            url: "https://a/".to_string(),
            body: "A".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["url"], "https://a/");
        assert_eq!(json["body"], "A");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("  short  ", 10), "short");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("héllo", 2), "hé...");
    }
}
