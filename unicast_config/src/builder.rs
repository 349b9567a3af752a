//! Orchestration of expansion, merging, peer injection and rendering.

use std::sync::Arc;

use tracing::debug;

use crate::expand::{ExpandMode, KeyExpander};
use crate::merge::merge_all;
use crate::peers::{PeerAddressList, inject_peers};
use crate::render::render;
use crate::{Tree, UnicastError, UnicastResult};

/// Name of the cluster identifier setting, as reported in errors.
pub const CLUSTER_SETTING: &str = "cluster";
/// Name of the override mapping setting, as reported in errors.
pub const CONFIG_HASH_SETTING: &str = "config_hash";

/// Inputs for one content computation.
///
/// The builder holds an immutable snapshot: the cluster identifier, the
/// override mapping and the peers discovered for that cluster. Computing
/// content never mutates it, so one builder may be rendered repeatedly.
///
/// # Examples
///
/// ```
/// use unicast_config::{ContentBuilder, PeerAddressList, Tree};
///
/// let content = ContentBuilder::new()
///     .cluster("logs")
///     .overrides(Tree::singleton("discovery.zen.minimum_master_nodes", "2"))
///     .peers(PeerAddressList::new())
///     .compute_expected()?;
/// assert_eq!(
///     content,
///     "## GENERATED BY PUPPET ##\n---\ndiscovery: \n  zen: \n    minimum_master_nodes: 2\n",
/// );
/// # Ok::<_, std::sync::Arc<unicast_config::UnicastError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentBuilder {
    cluster: Option<String>,
    overrides: Option<Tree>,
    peers: PeerAddressList,
    mode: ExpandMode,
}

impl ContentBuilder {
    /// Create a builder with no inputs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cluster: None,
            overrides: None,
            peers: PeerAddressList::new(),
            mode: ExpandMode::Permissive,
        }
    }

    /// Set the cluster identifier.
    #[must_use]
    pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Set the override mapping; compact dotted keys are allowed.
    #[must_use]
    pub fn overrides(mut self, overrides: Tree) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Set the peers discovered for the cluster.
    #[must_use]
    pub fn peers(mut self, peers: PeerAddressList) -> Self {
        self.peers = peers;
        self
    }

    /// Choose how malformed compact keys are handled.
    #[must_use]
    pub const fn expand_mode(mut self, mode: ExpandMode) -> Self {
        self.mode = mode;
        self
    }

    /// The cluster identifier, if one was supplied.
    #[must_use]
    pub fn cluster_name(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    /// Fail when a required input is absent, reporting every missing input.
    fn require_inputs(&self) -> UnicastResult<&Tree> {
        let mut missing = Vec::new();
        if self.cluster.is_none() {
            missing.push(UnicastError::missing(CLUSTER_SETTING));
        }
        if self.overrides.is_none() {
            missing.push(UnicastError::missing(CONFIG_HASH_SETTING));
        }
        if let Some(err) = UnicastError::try_aggregate(missing) {
            return Err(Arc::new(err));
        }
        self.overrides
            .as_ref()
            .ok_or_else(|| Arc::new(UnicastError::missing(CONFIG_HASH_SETTING)))
    }

    /// Expand, merge and inject peers, returning the final tree.
    ///
    /// # Errors
    ///
    /// Returns [`UnicastError::Configuration`] (or an aggregate of them) when
    /// the cluster identifier or override mapping is absent, and
    /// [`UnicastError::MalformedKey`] in strict mode.
    pub fn compute_tree(&self) -> UnicastResult<Tree> {
        let overrides = self.require_inputs()?;
        let fragments = KeyExpander::new(self.mode).expand(overrides)?;
        debug!(
            cluster = self.cluster_name(),
            fragments = fragments.len(),
            "expanded override mapping"
        );
        Ok(inject_peers(merge_all(fragments), &self.peers))
    }

    /// Compute the document that should be on disk.
    ///
    /// # Errors
    ///
    /// Fails as [`ContentBuilder::compute_tree`] does; nothing is rendered
    /// when it fails.
    pub fn compute_expected(&self) -> UnicastResult<String> {
        self.compute_tree().map(|tree| render(&tree))
    }
}

/// Compute expected content from borrowed inputs.
///
/// Permissive key handling is used; see [`ContentBuilder`] for strict mode.
///
/// # Errors
///
/// Returns [`UnicastError::Configuration`] when `cluster` or `overrides` is
/// `None`, or an aggregate when both are.
pub fn compute_expected(
    cluster: Option<&str>,
    overrides: Option<&Tree>,
    peers: &PeerAddressList,
) -> UnicastResult<String> {
    let mut builder = ContentBuilder::new().peers(peers.clone());
    if let Some(name) = cluster {
        builder = builder.cluster(name);
    }
    if let Some(tree) = overrides {
        builder = builder.overrides(tree.clone());
    }
    builder.compute_expected()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{CLUSTER_SETTING, CONFIG_HASH_SETTING, ContentBuilder};
    use crate::{ExpandMode, Tree, UnicastError};

    #[rstest]
    #[case::no_cluster(ContentBuilder::new().overrides(Tree::new()), CLUSTER_SETTING)]
    #[case::no_overrides(ContentBuilder::new().cluster("logs"), CONFIG_HASH_SETTING)]
    fn missing_input_is_a_configuration_error(
        #[case] builder: ContentBuilder,
        #[case] expected: &str,
    ) {
        let err = builder.compute_expected().expect_err("input missing");
        assert!(
            matches!(&*err, UnicastError::Configuration { setting } if setting == expected),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn both_missing_inputs_are_reported() {
        let err = ContentBuilder::new()
            .compute_expected()
            .expect_err("inputs missing");
        let UnicastError::Aggregate(errors) = &*err else {
            panic!("expected aggregate, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn strict_mode_surfaces_malformed_keys() {
        let err = ContentBuilder::new()
            .cluster("logs")
            .overrides(Tree::singleton("a..b", "1"))
            .expand_mode(ExpandMode::Strict)
            .compute_expected()
            .expect_err("strict mode rejects key");
        assert!(matches!(&*err, UnicastError::MalformedKey { .. }));
    }
}
