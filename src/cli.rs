// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per kind of fetcher:
// - fixture: crawl the built-in canned site (no network needed)
// - site: crawl a live website over HTTP
//
// Both share the output flags (--depth, --json, --live).
// =============================================================================

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "graph-crawler",
    version = "0.1.0",
    about = "Crawl a site concurrently, fetching every reachable page exactly once",
    long_about = "graph-crawler follows links from a starting URL up to a maximum depth. \
                  Every link is explored in its own task, and no page is fetched twice."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl the built-in four-page fixture site
    ///
    /// Example: graph-crawler fixture --depth 4
    Fixture {
        /// Where to start (must be a page of the fixture to find anything)
        #[arg(default_value = graph_crawler::fetch::FIXTURE_ROOT)]
        start_url: String,

        /// Maximum crawl depth
        ///
        /// Depth 1 = just the starting page
        /// Depth 2 = starting page + all pages it links to
        /// 0 or less = fetch nothing
        #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
        depth: i32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crawl a live website
    ///
    /// Example: graph-crawler site https://example.com --depth 2 --same-domain
    Site {
        /// Website URL to start from (e.g., https://example.com)
        website_url: String,

        /// Maximum crawl depth (see `fixture --help`)
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        depth: i32,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// Don't follow links that leave the starting domain
        #[arg(long)]
        same_domain: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// How results are shown.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output results in JSON format instead of a table
    #[arg(long, conflicts_with = "live")]
    pub json: bool,

    /// Log each page as it is crawled instead of printing a table at the end
    #[arg(long)]
    pub live: bool,
}
