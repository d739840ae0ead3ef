// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The tool takes one required positional argument, the root of the content
// project. Posts are always read from <PROJECT_ROOT>/source/_posts.
// The optional flags only tune how the run is carried out.
// =============================================================================

use crate::pool::DEFAULT_WORKERS;
use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code.
// A missing PROJECT_ROOT makes clap print the usage and exit non-zero
// before anything else runs.
#[derive(Parser, Debug)]
#[command(
    name = "image-localizer",
    version,
    about = "Download the remote images of a blog's posts and point the links at local copies",
    long_about = "image-localizer scans <PROJECT_ROOT>/source/_posts for markdown files, downloads \
                  every linked .jpg/.jpeg/.png image into a directory next to the post (named after \
                  the post) and rewrites the links to the local files. Meant to be run once."
)]
pub struct Cli {
    /// Root of the content project (e.g. a Hexo site)
    ///
    /// This is a positional argument (required, no flag needed)
    pub project_root: PathBuf,

    /// Number of documents processed concurrently
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Extra attempts per image after a network failure
    ///
    /// 0 means every image is tried exactly once
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Print the per-document report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}
