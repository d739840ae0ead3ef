// src/links/mod.rs
// =============================================================================
// This module understands the `[label](target)` link syntax.
//
// Submodules:
// - extract: finds the link targets of a document and picks the image URLs
// - rewrite: points links at the local copy once an image has been downloaded
// =============================================================================

mod extract;
mod rewrite;

pub use extract::extract_image_urls;
pub use rewrite::{file_name_of, localize_links};
