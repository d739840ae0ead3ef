// src/links/rewrite.rs
// =============================================================================
// This module rewrites link targets.
//
// Rewriting is an exact substring substitution: every "](url)" in the text
// becomes "](local)". That covers forms the link tokenizer in extract.rs
// never yields as spans, like the outer target of a linked image
// `[![alt](url)](url)` or an empty label `[](url)`.
//
// Note: a "](url)" that is not part of any link is rewritten too.
// =============================================================================

// Points every `](url)` in `text` at `local`
//
// Example:
//   localize_links("[![a](http://h/x.png)](http://h/x.png)", "http://h/x.png", "x.png")
//   -> "[![a](x.png)](x.png)"
pub fn localize_links(text: &str, url: &str, local: &str) -> String {
    text.replace(&format!("]({})", url), &format!("]({})", local))
}

// The local file name for a link target: its last path element
//
// Two URLs with the same last element map to the same file; the later
// download overwrites the earlier one.
pub fn file_name_of(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_matching_target() {
        let text = "![alt](http://x.test/img.png) [link](http://x.test/page.html)";
        assert_eq!(
            localize_links(text, "http://x.test/img.png", "img.png"),
            "![alt](img.png) [link](http://x.test/page.html)"
        );
    }

    #[test]
    fn test_rewrites_every_occurrence() {
        let text = "[a](http://h/x.png)\n[b](http://h/x.png)";
        assert_eq!(
            localize_links(text, "http://h/x.png", "x.png"),
            "[a](x.png)\n[b](x.png)"
        );
    }

    #[test]
    fn test_rewrites_linked_image_and_empty_label() {
        let text = "[![a](http://h/x.png)](http://h/x.png)\n[](http://h/x.png)\n";
        assert_eq!(
            localize_links(text, "http://h/x.png", "x.png"),
            "[![a](x.png)](x.png)\n[](x.png)\n"
        );
    }

    #[test]
    fn test_leaves_unmatched_text_byte_identical() {
        let text = "# Title\n\n[a](http://h/y.png) trailing ü text\n";
        assert_eq!(localize_links(text, "http://h/x.png", "x.png"), text);
    }

    #[test]
    fn test_bare_url_without_bracket_is_kept() {
        let text = "see http://h/x.png or (http://h/x.png)";
        assert_eq!(localize_links(text, "http://h/x.png", "x.png"), text);
    }

    #[test]
    fn test_target_must_match_exactly() {
        let text = "[a](http://h/x.png.bak) [b](http://h/x.png)";
        assert_eq!(
            localize_links(text, "http://h/x.png", "x.png"),
            "[a](http://h/x.png.bak) [b](x.png)"
        );
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("http://x.test/a/b/img.png"), "img.png");
        assert_eq!(file_name_of("img.png"), "img.png");
    }
}
