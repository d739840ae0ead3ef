// src/process/mod.rs
// =============================================================================
// This module localizes the images of one document.
//
// It glues the other modules together for a single path:
// read -> extract links -> create image directory -> download + rewrite
// each image -> write the document back.
// =============================================================================

mod document;

pub use document::{process_document, DocumentReport, DocumentStatus};
