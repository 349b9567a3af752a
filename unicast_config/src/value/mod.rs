//! Configuration tree model.
//!
//! A [`Tree`] maps string keys to [`ConfigValue`]s. Values are either plain
//! scalars, flat lists of strings, or nested trees; nothing else is
//! representable in a rendered document, so nothing else is accepted here.
//! Key order inside a tree carries no meaning: storage is a [`BTreeMap`], so
//! iteration is always in ascending byte order.

mod convert;

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// A single node of a configuration tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Leaf value rendered verbatim after its key.
    Scalar(String),
    /// Ordered list of items, duplicates allowed.
    List(Vec<String>),
    /// Nested mapping.
    Tree(Tree),
}

impl ConfigValue {
    /// Build a scalar value.
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Build a list value from any iterator of string-like items.
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::List(_) => "list",
            Self::Tree(_) => "tree",
        }
    }

    /// Returns the nested tree when this value is one.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Scalar(_) | Self::List(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Tree> for ConfigValue {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

/// Mapping from unique keys to [`ConfigValue`]s.
///
/// # Examples
///
/// ```
/// use unicast_config::{ConfigValue, Tree};
///
/// let tree: Tree = [("b", "2"), ("a", "1")].into_iter().collect();
/// let keys: Vec<_> = tree.keys().collect();
/// assert_eq!(keys, ["a", "b"]);
/// assert_eq!(tree.get("a"), Some(&ConfigValue::scalar("1")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tree(BTreeMap<String, ConfigValue>);

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a tree holding exactly one entry.
    #[must_use]
    pub fn singleton(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        let mut tree = Self::new();
        tree.insert(key, value);
        tree
    }

    /// Build the single-branch tree that places `leaf` at `path`.
    ///
    /// An empty `path` yields an empty tree.
    #[must_use]
    pub fn nested<S: AsRef<str>>(path: &[S], leaf: ConfigValue) -> Self {
        let Some((last, parents)) = path.split_last() else {
            return Self::new();
        };
        parents
            .iter()
            .rev()
            .fold(Self::singleton(last.as_ref(), leaf), |inner, key| {
                Self::singleton(key.as_ref(), inner)
            })
    }

    /// Insert `value` under `key`, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the value stored directly under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Follow `path` through nested trees.
    #[must_use]
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&ConfigValue> {
        let (first, rest) = path.split_first()?;
        let value = self.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(value);
        }
        value.as_tree()?.get_path(rest)
    }

    /// Number of entries at this level.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "BTreeMap::len is not const-stable"
    )]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the tree has no entries.
    #[must_use]
    #[expect(
        clippy::missing_const_for_fn,
        reason = "BTreeMap::is_empty is not const-stable"
    )]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys at this level in ascending byte order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries at this level in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.0.iter()
    }

    pub(crate) fn entry(&mut self, key: String) -> btree_map::Entry<'_, String, ConfigValue> {
        self.0.entry(key)
    }
}

impl<K, V> FromIterator<(K, V)> for Tree
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Tree {
    type Item = (String, ConfigValue);
    type IntoIter = btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
