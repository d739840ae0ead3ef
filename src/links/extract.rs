// src/links/extract.rs
// =============================================================================
// This module finds image links in document text.
//
// The link syntax is deliberately loose, not CommonMark:
//   [<label>](<target>)
// where <label> is one or more characters other than `]` and <target> is one
// or more characters other than `)`. Matches never overlap.
//
// A link qualifies as an image when the last path element of its target
// ends in one of the recognized extensions. Everything else (pages, gifs,
// targets with no extension at all) is simply skipped.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Extensions we download. Compared case-sensitively.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]+\]\(([^)]+)\)").unwrap());

// The raw targets of every `[label](target)` in `text`, in document order
fn link_targets(text: &str) -> impl Iterator<Item = &str> {
    LINK_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str())
}

// Extracts the image URLs referenced by a document
//
// Returns: each qualifying target once, in first-occurrence order.
// An empty Vec means there is nothing to localize in this document.
//
// Example:
//   "![a](http://x.test/img.png) [b](http://x.test/page.html)"
//   -> ["http://x.test/img.png"]
pub fn extract_image_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    link_targets(text)
        .filter(|target| image_extension(target).is_some())
        .filter(|target| seen.insert(*target))
        .map(str::to_string)
        .collect()
}

// Returns the recognized image extension of a link target, if any
//
// The extension is everything from the last `.` of the last path element,
// so "http://x.test/a.b/img" has no extension and "img.png?w=1" is ".png?w=1"
// (which does not qualify).
pub fn image_extension(target: &str) -> Option<&'static str> {
    let name = target.rsplit('/').next().unwrap_or(target);
    let dot = name.rfind('.')?;
    let ext = &name[dot..];

    IMAGE_EXTENSIONS.iter().copied().find(|known| *known == ext)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Lazy<Regex>?
//    - A static that is built the first time it is used
//    - Compiling a regex is expensive, so we do it once per process
//
// 2. Why does link_targets return `impl Iterator<Item = &str>`?
//    - Targets are short-lived views into the document
//    - Borrowing avoids copying every target just to compare it
//
// 3. Why HashSet::insert inside filter?
//    - insert() returns false when the value was already there
//    - So the filter keeps only the first occurrence of each URL
// -----------------------------------------------------------------------------
