//! Aggregated configuration documents for unicast clusters.
//!
//! A managed configuration file is computed from two inputs: an override
//! mapping whose keys may use a compact dotted form (`discovery.zen.x`), and
//! the addresses every cluster member announced. The pipeline is pure and runs
//! in four steps:
//!
//! 1. [`KeyExpander`] turns the override mapping into single-path fragments.
//! 2. [`merge_all`] folds the fragments into one [`Tree`], concatenating lists
//!    and letting later values win everywhere else.
//! 3. [`inject_peers`] appends the discovered addresses to
//!    `discovery.zen.ping.unicast.hosts`.
//! 4. [`render`] emits the tree with sorted keys so repeated runs produce the
//!    same bytes.
//!
//! [`ContentBuilder`] wires those steps together. The [`Catalog`],
//! [`ConfigResource`] and [`ContentSync`] types supply inputs from declaration
//! documents and write the result to disk; the pipeline never calls them.
//!
//! ```
//! use unicast_config::{ContentBuilder, PeerAddressList, Tree};
//!
//! let peers: PeerAddressList = ["10.0.0.1", "10.0.0.2"].into_iter().collect();
//! let content = ContentBuilder::new()
//!     .cluster("logs")
//!     .overrides(Tree::new())
//!     .peers(peers)
//!     .compute_expected()?;
//! assert!(content.ends_with("hosts: \n             - 10.0.0.1\n             - 10.0.0.2\n"));
//! # Ok::<_, std::sync::Arc<unicast_config::UnicastError>>(())
//! ```

use std::sync::Arc;

mod builder;
mod catalog;
mod error;
mod expand;
mod merge;
mod peers;
mod render;
mod resource;
mod result_ext;
mod sync;
mod value;

pub use builder::{CLUSTER_SETTING, CONFIG_HASH_SETTING, ContentBuilder, compute_expected};
pub use catalog::{Catalog, CatalogFormat, UnicastNode};
pub use error::{AggregatedErrors, UnicastError};
pub use expand::{ExpandMode, KEY_SEPARATOR, KeyExpander, expand};
pub use merge::{merge, merge_all};
pub use peers::{PeerAddressList, UNICAST_HOSTS_PATH, inject_peers};
pub use render::{NO_CONTENT, PREAMBLE, is_no_content, render};
pub use resource::{ConfigResource, DEFAULT_MODE, EnsureState};
pub use result_ext::UnicastResultExt;
pub use sync::{ContentSync, SyncOutcome, checksum};
pub use value::{ConfigValue, Tree};

/// Result type whose error is a shared [`UnicastError`].
pub type UnicastResult<T> = Result<T, Arc<UnicastError>>;
