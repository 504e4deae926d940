// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG controls the level, default "info")
// 2. Parse command-line arguments using clap
// 3. Build the right fetcher for the subcommand
// 4. Crawl, then print results
// 5. Exit with proper code (0 = every page fetched, 1 = some failed, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use graph_crawler::crawl;
use graph_crawler::fetch::{FakeFetcher, Fetcher, HttpFetcher};
use graph_crawler::report::{self, CollectingReporter, CrawlEvent, LogReporter};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every page fetched
//   Ok(1) = at least one fetch failed
//   Err   = could not even start the crawl
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fixture { start_url, depth, output } => {
            log::info!("Crawling fixture site from {} (depth {})", start_url, depth);
            let fetcher = Arc::new(FakeFetcher::golang());
            run_crawl(&start_url, depth, fetcher, output).await
        }
        Commands::Site { website_url, depth, timeout, same_domain, output } => {
            log::info!("Crawling {} (depth {})", website_url, depth);
            let mut fetcher = HttpFetcher::new(Duration::from_secs(timeout))
                .context("could not build HTTP client")?;
            if same_domain {
                fetcher = fetcher.same_domain_as(&website_url)?;
            }
            run_crawl(&website_url, depth, Arc::new(fetcher), output).await
        }
    }
}

async fn run_crawl(
    start_url: &str,
    depth: i32,
    fetcher: Arc<dyn Fetcher>,
    output: OutputArgs,
) -> Result<i32> {
    if output.live {
        let reporter = Arc::new(LogReporter::new());
        let summary = crawl::crawl(start_url, depth, fetcher, reporter.clone()).await;

        log::info!(
            "Done: {} page(s) visited, {} ok, {} failed",
            summary.visited,
            reporter.found_count(),
            reporter.failed_count()
        );
        return Ok(exit_code(reporter.failed_count()));
    }

    let reporter = Arc::new(CollectingReporter::new());
    let summary = crawl::crawl(start_url, depth, fetcher, reporter.clone()).await;
    log::info!("Crawled {} page(s)", summary.visited);

    let events = reporter.events();
    print_results(&events, output.json)?;

    Ok(exit_code(reporter.failures().len()))
}

fn exit_code(failed: usize) -> i32 {
    if failed > 0 {
        1
    } else {
        0
    }
}

// Prints the events either as a table or JSON
fn print_results(events: &[CrawlEvent], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(events)?;
        println!("{}", json_output);
    } else {
        print_table(events);
    }
    Ok(())
}

fn print_table(events: &[CrawlEvent]) {
    println!("{:<50} {:<10} {:<40}", "URL", "STATUS", "DETAIL");
    println!("{}", "=".repeat(100));

    for event in events {
        let (status, detail) = match event {
            CrawlEvent::Found { body, .. } => ("✅ FOUND", report::preview(body, 37)),
            CrawlEvent::Failed { error, .. } => ("❌ FAILED", error.clone()),
        };

        let url = event.url();
        let url_display = if url.chars().count() > 47 {
            report::preview(url, 47)
        } else {
            url.to_string()
        };

        println!("{:<50} {:<10} {:<40}", url_display, status, detail);
    }

    println!();

    let ok_count = events.iter().filter(|e| e.is_ok()).count();
    let failed_count = events.len() - ok_count;

    println!("📊 Summary:");
    println!("   ✅ Found: {}", ok_count);
    println!("   ❌ Failed: {}", failed_count);
    println!("   📋 Total: {}", events.len());
}
