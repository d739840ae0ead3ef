// src/fetch/mod.rs
// =============================================================================
// This module downloads images.
//
// Submodules:
// - image: the HTTP download itself, streamed straight to disk
// - policy: how many times to try again after a transport failure
// =============================================================================

mod image;
mod policy;

pub use image::ImageFetcher;
pub use policy::RetryPolicy;
