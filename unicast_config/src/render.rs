//! Deterministic YAML-like rendering of configuration trees.
//!
//! The output only has to be stable, not general: keys are emitted in
//! ascending byte order at every level, nested keys are indented by two spaces
//! per level, and list items are aligned under the end of their key. Rendering
//! the same tree twice yields identical bytes, which is what lets the written
//! file be compared by checksum.

use crate::{ConfigValue, Tree};

/// Marker written at the top of every rendered document.
pub const PREAMBLE: &str = "## GENERATED BY PUPPET ##\n---\n";

/// Placeholder meaning "no content has been computed".
///
/// It can never be produced by [`render`], and must never be written to disk
/// as managed content.
pub const NO_CONTENT: &str = "\0## GENERATED BY PUPPET ##\0";

const INDENT: &str = "  ";

/// Returns `true` when `content` is the [`NO_CONTENT`] placeholder.
#[must_use]
pub fn is_no_content(content: &str) -> bool {
    content == NO_CONTENT
}

/// Render `tree` as a document beginning with [`PREAMBLE`].
///
/// # Examples
///
/// ```
/// use unicast_config::{Tree, render};
///
/// let tree: Tree = [("b", "2"), ("a", "1")].into_iter().collect();
/// assert_eq!(render(&tree), "## GENERATED BY PUPPET ##\n---\na: 1\nb: 2\n");
/// assert_eq!(render(&Tree::new()), "## GENERATED BY PUPPET ##\n---\n");
/// ```
#[must_use]
pub fn render(tree: &Tree) -> String {
    let mut out = String::from(PREAMBLE);
    render_level(tree, 0, &mut out);
    out
}

fn render_level(tree: &Tree, depth: usize, out: &mut String) {
    let indent = INDENT.repeat(depth);
    for (key, value) in tree {
        out.push_str(&indent);
        out.push_str(key);
        out.push_str(": ");
        match value {
            ConfigValue::Scalar(text) => {
                out.push_str(text);
                out.push('\n');
            }
            ConfigValue::List(items) => {
                out.push('\n');
                let item_indent = format!("{indent}{}- ", " ".repeat(key.chars().count()));
                for item in items {
                    out.push_str(&item_indent);
                    out.push_str(item);
                    out.push('\n');
                }
            }
            ConfigValue::Tree(inner) => {
                out.push('\n');
                render_level(inner, depth + 1, out);
            }
        }
    }
}
