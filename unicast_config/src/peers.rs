//! Injection of discovered peer addresses into the unicast host list.

use tracing::debug;

use crate::merge::merge;
use crate::{ConfigValue, Tree};

/// Location of the unicast host list within the rendered document.
pub const UNICAST_HOSTS_PATH: [&str; 5] = ["discovery", "zen", "ping", "unicast", "hosts"];

/// Ordered peer addresses for one cluster.
///
/// Order is discovery order and duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeerAddressList(Vec<String>);

impl PeerAddressList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an address.
    pub fn push(&mut self, address: impl Into<String>) {
        self.0.push(address.into());
    }

    /// Number of addresses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no peer was discovered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The addresses in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The fully nested tree placing these addresses at [`UNICAST_HOSTS_PATH`].
    #[must_use]
    pub fn to_tree(&self) -> Tree {
        Tree::nested(&UNICAST_HOSTS_PATH, ConfigValue::List(self.0.clone()))
    }
}

impl<S: Into<String>> FromIterator<S> for PeerAddressList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for PeerAddressList {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

/// Merge `peers` into `tree` at [`UNICAST_HOSTS_PATH`].
///
/// Addresses are appended to any list already present at that path. An empty
/// peer list returns `tree` unchanged, so no empty host list is ever added.
///
/// # Examples
///
/// ```
/// use unicast_config::{ConfigValue, PeerAddressList, Tree, UNICAST_HOSTS_PATH, inject_peers};
///
/// let peers: PeerAddressList = ["10.0.0.1", "10.0.0.2"].into_iter().collect();
/// let tree = inject_peers(Tree::new(), &peers);
/// assert_eq!(
///     tree.get_path(&UNICAST_HOSTS_PATH),
///     Some(&ConfigValue::list(["10.0.0.1", "10.0.0.2"])),
/// );
/// ```
#[must_use]
pub fn inject_peers(tree: Tree, peers: &PeerAddressList) -> Tree {
    if peers.is_empty() {
        return tree;
    }
    debug!(peers = peers.len(), "injecting unicast hosts");
    merge(tree, peers.to_tree())
}

#[cfg(test)]
mod tests {
    use super::{PeerAddressList, UNICAST_HOSTS_PATH, inject_peers};
    use crate::{ConfigValue, Tree};

    #[test]
    fn empty_peer_list_leaves_tree_untouched() {
        let tree = Tree::singleton("cluster", Tree::singleton("name", "logs"));
        assert_eq!(inject_peers(tree.clone(), &PeerAddressList::new()), tree);
        assert!(inject_peers(Tree::new(), &PeerAddressList::new()).is_empty());
    }

    #[test]
    fn peers_follow_configured_hosts() {
        let configured = Tree::nested(&UNICAST_HOSTS_PATH, ConfigValue::list(["seed"]));
        let peers: PeerAddressList = ["10.0.0.1", "seed"].into_iter().collect();
        let tree = inject_peers(configured, &peers);
        assert_eq!(
            tree.get_path(&UNICAST_HOSTS_PATH),
            Some(&ConfigValue::list(["seed", "10.0.0.1", "seed"]))
        );
    }

    #[test]
    fn peers_replace_a_scalar_host_setting() {
        let configured = Tree::nested(&UNICAST_HOSTS_PATH, ConfigValue::scalar("seed"));
        let peers: PeerAddressList = ["10.0.0.1"].into_iter().collect();
        let tree = inject_peers(configured, &peers);
        assert_eq!(
            tree.get_path(&UNICAST_HOSTS_PATH),
            Some(&ConfigValue::list(["10.0.0.1"]))
        );
    }
}
