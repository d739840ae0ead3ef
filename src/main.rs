// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Find every markdown post under <root>/source/_posts
// 3. Hand the posts to a pool of workers that localize their images
// 4. Wait for every post to finish, print a report
// 5. Exit with proper code (0 = run completed, 1 = could not run at all)
//
// Failed downloads or unreadable posts do not change the exit code. They are
// logged while the run goes on and show up in the final report.
// =============================================================================

mod cli;
mod error;
mod fetch;
mod links;
mod pool;
mod process;
mod scan;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use fetch::{ImageFetcher, RetryPolicy};
use process::{DocumentReport, DocumentStatus};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays parseable.
// RUST_LOG overrides the default "info" level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let posts_dir = cli.project_root.join(scan::POSTS_DIR);
    info!(dir = %posts_dir.display(), "scanning posts");

    let paths = scan::find_documents(&posts_dir)?;
    info!(documents = paths.len(), workers = cli.workers, "starting");

    let fetcher = ImageFetcher::new(RetryPolicy::with_retries(cli.retries))
        .context("can't build HTTP client")?;

    let reports = localize_all(paths, cli.workers, fetcher).await;

    print_results(&reports, cli.json)?;
    info!("All tasks completed");

    Ok(0)
}

// Runs every document through the worker pool and returns the reports,
// sorted by path
async fn localize_all(
    paths: Vec<PathBuf>,
    workers: usize,
    fetcher: ImageFetcher,
) -> Vec<DocumentReport> {
    let outcomes = pool::run_pool(paths, workers, move |path: PathBuf| {
        let fetcher = fetcher.clone();
        async move {
            debug!(path = %path.display(), "processing");
            process::process_document(&fetcher, &path).await
        }
    })
    .await;

    let mut reports: Vec<DocumentReport> = outcomes.into_iter().map(into_report).collect();

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    reports
}

// A document whose processing panicked still gets a report
fn into_report(outcome: Result<DocumentReport, PathBuf>) -> DocumentReport {
    outcome.unwrap_or_else(|path| DocumentReport {
        path,
        status: DocumentStatus::Failed {
            reason: "processing panicked".to_string(),
        },
    })
}

fn print_results(reports: &[DocumentReport], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
    } else {
        print_summary(reports);
    }
    Ok(())
}

fn print_summary(reports: &[DocumentReport]) {
    let mut untouched = 0;
    let mut rewritten = 0;
    let mut images_ok = 0;
    let mut images_failed = 0;

    for report in reports {
        match &report.status {
            DocumentStatus::NoImages => untouched += 1,
            DocumentStatus::Localized { localized, failed } => {
                rewritten += 1;
                images_ok += localized;
                images_failed += failed;
            }
            DocumentStatus::Failed { reason } => {
                println!("❌ {}: {}", report.path.display(), reason);
            }
        }
    }

    let failed_docs = reports.iter().filter(|r| !r.is_ok()).count();

    println!();
    println!("📊 Summary:");
    println!("   📄 Documents: {}", reports.len());
    println!("   ✏️  Rewritten: {}", rewritten);
    println!("   💤 No images: {}", untouched);
    println!("   ❌ Failed: {}", failed_docs);
    println!("   🖼️  Images saved: {}", images_ok);
    println!("   ⚠️  Images left remote: {}", images_failed);
    println!("✅ All tasks completed");
}
