// src/scan/mod.rs
// =============================================================================
// This module discovers the documents we need to process.
//
// A Hexo-style content project keeps its posts under `source/_posts`.
// We walk that directory recursively and collect every `.md` file.
// =============================================================================

mod walk;

pub use walk::{find_documents, POSTS_DIR};
