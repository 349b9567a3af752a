//! Deep merge of configuration trees.
//!
//! Merging is right-biased: where both sides hold a tree the merge recurses,
//! where both sides hold a list the lists are concatenated left then right, and
//! in every other collision the right-hand value replaces the left. Type
//! mismatches are resolved by that last rule and never fail.

use std::collections::btree_map::Entry;

use crate::{ConfigValue, Tree};

/// Merge `overlay` over `base`, returning the combined tree.
///
/// # Examples
///
/// ```
/// use unicast_config::{ConfigValue, Tree, merge};
///
/// let base = Tree::singleton("hosts", ConfigValue::list(["a", "b"]));
/// let overlay = Tree::singleton("hosts", ConfigValue::list(["c"]));
/// let merged = merge(base, overlay);
/// assert_eq!(merged.get("hosts"), Some(&ConfigValue::list(["a", "b", "c"])));
/// ```
#[must_use]
pub fn merge(base: Tree, overlay: Tree) -> Tree {
    let mut target = base;
    merge_tree(&mut target, overlay);
    target
}

/// Left-fold `fragments` with [`merge`], starting from an empty tree.
///
/// Order matters: later fragments win scalar collisions and their list items
/// follow those of earlier fragments.
#[must_use]
pub fn merge_all<I>(fragments: I) -> Tree
where
    I: IntoIterator<Item = Tree>,
{
    fragments.into_iter().fold(Tree::new(), merge)
}

impl Tree {
    /// Method form of [`merge`].
    #[must_use]
    pub fn merged_with(self, overlay: Self) -> Self {
        merge(self, overlay)
    }
}

fn merge_tree(target: &mut Tree, overlay: Tree) {
    for (key, incoming) in overlay {
        match target.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), incoming),
        }
    }
}

fn merge_value(existing: &mut ConfigValue, incoming: ConfigValue) {
    match (existing, incoming) {
        (ConfigValue::Tree(current), ConfigValue::Tree(next)) => merge_tree(current, next),
        (ConfigValue::List(current), ConfigValue::List(next)) => current.extend(next),
        (slot, next) => *slot = next,
    }
}
