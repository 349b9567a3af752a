//! Declarations of managed configuration files and unicast cluster members.
//!
//! A catalog is the snapshot the content builder is fed from: every
//! [`ConfigResource`] to manage and every [`UnicastNode`] announcing an address
//! for a cluster. Catalogs are usually read from a document such as:
//!
//! ```toml
//! [[config]]
//! name = "/etc/elasticsearch/elasticsearch.yml"
//! cluster = "logs"
//!
//! [config.config_hash]
//! "cluster.name" = "logs"
//! "discovery.zen.minimum_master_nodes" = 2
//!
//! [[unicast_node]]
//! cluster = "logs"
//! ipaddress = "10.0.0.1"
//! ```

mod format;
#[cfg(feature = "yaml")]
mod yaml;

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::result_ext::FileResultExt;
use crate::{ConfigResource, PeerAddressList, UnicastResult, UnicastResultExt};

pub use format::CatalogFormat;

/// A cluster member announcing its address.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct UnicastNode {
    cluster: String,
    ipaddress: String,
}

impl UnicastNode {
    /// Declare a node of `cluster` reachable at `ipaddress`.
    #[must_use]
    pub fn new(cluster: impl Into<String>, ipaddress: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            ipaddress: ipaddress.into(),
        }
    }

    /// Cluster the node belongs to.
    #[must_use]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Address announced for unicast discovery.
    #[must_use]
    pub fn ipaddress(&self) -> &str {
        &self.ipaddress
    }
}

/// Snapshot of every declared resource and unicast node.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "config")]
    resources: Vec<ConfigResource>,
    #[serde(default, rename = "unicast_node")]
    nodes: Vec<UnicastNode>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resources: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Declare a unicast node.
    pub fn add_node(&mut self, node: UnicastNode) {
        self.nodes.push(node);
    }

    /// Declare a managed configuration resource.
    pub fn add_resource(&mut self, resource: ConfigResource) {
        self.resources.push(resource);
    }

    /// Every declared node, in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[UnicastNode] {
        &self.nodes
    }

    /// Every declared resource, in declaration order.
    #[must_use]
    pub fn resources(&self) -> &[ConfigResource] {
        &self.resources
    }

    /// Look up a resource by name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ConfigResource> {
        self.resources.iter().find(|resource| resource.name() == name)
    }

    /// Addresses of the nodes declared for `cluster`, in declaration order.
    ///
    /// Duplicate addresses are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicast_config::{Catalog, UnicastNode};
    ///
    /// let mut catalog = Catalog::new();
    /// catalog.add_node(UnicastNode::new("logs", "10.0.0.1"));
    /// catalog.add_node(UnicastNode::new("metrics", "10.0.0.9"));
    /// catalog.add_node(UnicastNode::new("logs", "10.0.0.2"));
    /// assert_eq!(catalog.peers_for("logs").as_slice(), ["10.0.0.1", "10.0.0.2"]);
    /// ```
    #[must_use]
    pub fn peers_for(&self, cluster: &str) -> PeerAddressList {
        self.nodes
            .iter()
            .filter(|node| node.cluster == cluster)
            .map(|node| node.ipaddress.as_str())
            .collect()
    }

    /// Parse a catalog document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnicastError::File`] when `data` is not valid in
    /// `format` (or the format's feature is disabled) and
    /// [`crate::UnicastError::Gathering`] when the document does not describe
    /// a catalog.
    pub fn from_str_with_format(data: &str, format: CatalogFormat) -> UnicastResult<Self> {
        Self::parse(Path::new("<inline>"), data, format)
    }

    /// Read and parse the catalog at `path`, choosing the format from its
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnicastError::File`] when the file cannot be read or
    /// parsed and [`crate::UnicastError::Gathering`] when it does not describe
    /// a catalog.
    pub fn load(path: &Path) -> UnicastResult<Self> {
        let data = std::fs::read_to_string(path).for_file(path)?;
        Self::parse(path, &data, CatalogFormat::from_path(path))
    }

    fn parse(origin: &Path, data: &str, format: CatalogFormat) -> UnicastResult<Self> {
        let catalog: Self = format::parse_catalog(origin, data, format)?
            .extract()
            .into_unicast()?;
        debug!(
            origin = %origin.display(),
            resources = catalog.resources.len(),
            nodes = catalog.nodes.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
