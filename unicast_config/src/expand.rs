//! Expansion of compact dotted keys into single-branch fragments.
//!
//! A compact key such as `discovery.zen.minimum_master_nodes` is shorthand for
//! three nested mappings. Expansion peels one segment per step: the text before
//! the first separator becomes the outer key and the remainder is treated as an
//! opaque key that is expanded again on the next step. The result is a list of
//! fragments, each holding exactly one path, which [`crate::merge_all`]
//! folds back into a single tree.

use crate::{ConfigValue, Tree, UnicastError, UnicastResult};

/// Separator between path segments in a compact key.
pub const KEY_SEPARATOR: char = '.';

/// How compact keys with empty segments are treated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExpandMode {
    /// Keys that do not split cleanly are kept as literal keys.
    #[default]
    Permissive,
    /// Keys with empty segments are rejected with
    /// [`UnicastError::MalformedKey`].
    Strict,
}

/// Splits `key` at its first separator when the leading segment is non-empty.
fn split_compact(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
        .filter(|(head, _)| !head.is_empty())
}

fn validate_strict(key: &str) -> Result<(), UnicastError> {
    if key.is_empty() {
        return Err(UnicastError::malformed_key(key, "empty key"));
    }
    if key.split(KEY_SEPARATOR).any(str::is_empty) {
        return Err(UnicastError::malformed_key(key, "empty path segment"));
    }
    Ok(())
}

/// Turns a mapping with compact keys into single-path fragments.
///
/// # Examples
///
/// ```
/// use unicast_config::{ConfigValue, KeyExpander, Tree};
///
/// let mapping = Tree::singleton("discovery.zen.minimum_master_nodes", "2");
/// let fragments = KeyExpander::default().expand(&mapping)?;
/// assert_eq!(fragments.len(), 1);
/// assert_eq!(
///     fragments[0].get_path(&["discovery", "zen", "minimum_master_nodes"]),
///     Some(&ConfigValue::scalar("2")),
/// );
/// # Ok::<_, std::sync::Arc<unicast_config::UnicastError>>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyExpander {
    mode: ExpandMode,
}

impl KeyExpander {
    /// Create an expander using `mode`.
    #[must_use]
    pub const fn new(mode: ExpandMode) -> Self {
        Self { mode }
    }

    /// Create an expander that rejects malformed compact keys.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(ExpandMode::Strict)
    }

    /// The mode this expander applies.
    #[must_use]
    pub const fn mode(&self) -> ExpandMode {
        self.mode
    }

    /// Expand every entry of `mapping` into fragments.
    ///
    /// Fragments are produced in the iteration order of `mapping`. An empty
    /// mapping, or one whose nested mappings are all empty, produces no
    /// fragments.
    ///
    /// # Errors
    ///
    /// In [`ExpandMode::Strict`] returns [`UnicastError::MalformedKey`] for
    /// the first key with an empty segment. Permissive expansion never fails.
    pub fn expand(&self, mapping: &Tree) -> UnicastResult<Vec<Tree>> {
        if self.mode == ExpandMode::Strict {
            validate_tree(mapping)?;
        }
        Ok(expand(mapping))
    }
}

/// Check every key of `mapping` and its nested trees, depth first.
fn validate_tree(mapping: &Tree) -> Result<(), UnicastError> {
    for (key, value) in mapping {
        validate_strict(key)?;
        if let ConfigValue::Tree(inner) = value {
            validate_tree(inner)?;
        }
    }
    Ok(())
}

fn expand_into(mapping: &Tree, out: &mut Vec<Tree>) {
    for (key, value) in mapping {
        if let Some((head, rest)) = split_compact(key) {
            let wrapper = Tree::singleton(head, Tree::singleton(rest, value.clone()));
            expand_into(&wrapper, out);
        } else if let ConfigValue::Tree(inner) = value {
            let mut nested = Vec::new();
            expand_into(inner, &mut nested);
            out.extend(
                nested
                    .into_iter()
                    .map(|fragment| Tree::singleton(key.as_str(), fragment)),
            );
        } else {
            out.push(Tree::singleton(key.as_str(), value.clone()));
        }
    }
}

/// Expand `mapping` permissively.
///
/// Equivalent to `KeyExpander::default().expand(mapping)`; odd keys are kept
/// literally, so there is nothing to report.
#[must_use]
pub fn expand(mapping: &Tree) -> Vec<Tree> {
    let mut fragments = Vec::new();
    expand_into(mapping, &mut fragments);
    fragments
}
