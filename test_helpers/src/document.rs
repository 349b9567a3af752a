//! Expected text of rendered configuration documents.

/// Header every rendered document starts with.
pub const HEADER: &str = "## GENERATED BY PUPPET ##\n---\n";

/// Returns `content` without its header, or `None` when the header is absent.
#[must_use]
pub fn body(content: &str) -> Option<&str> {
    content.strip_prefix(HEADER)
}

/// Prefix `body` with the document header.
#[must_use]
pub fn document(body: &str) -> String {
    format!("{HEADER}{body}")
}

/// Lines for a list rendered under a key written at `depth` levels of
/// nesting.
///
/// Items are indented past the key's own indentation by the key's character
/// count, matching how lists are laid out beneath `key: `.
#[must_use]
pub fn list_block(depth: usize, key: &str, items: &[&str]) -> String {
    let indent = "  ".repeat(depth);
    let column = " ".repeat(indent.len() + key.chars().count());
    let mut out = format!("{indent}{key}: \n");
    for item in items {
        out.push_str(&column);
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
    out
}
