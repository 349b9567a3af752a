//! Declared configuration files and their settings.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::expand::ExpandMode;
use crate::sync::{ContentSync, SyncOutcome};
use crate::{Catalog, ContentBuilder, Tree, UnicastError, UnicastResult};

/// Permissions applied to managed files unless a resource says otherwise.
pub const DEFAULT_MODE: &str = "0644";

fn default_mode() -> String {
    DEFAULT_MODE.to_owned()
}

/// Whether a resource's file should exist.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnsureState {
    /// The file is written with the computed content.
    #[default]
    Present,
    /// The file is deleted; no content is computed.
    Absent,
}

/// A configuration file whose content is computed from its settings and the
/// peers discovered for its cluster.
///
/// `cluster` and `config_hash` are optional at declaration time so a catalog
/// can be loaded and inspected; computing content requires both.
#[derive(Clone, Debug, Deserialize)]
pub struct ConfigResource {
    name: String,
    #[serde(default)]
    cluster: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default)]
    config_hash: Option<JsonValue>,
    #[serde(default)]
    strict_keys: bool,
    #[serde(default)]
    ensure: EnsureState,
}

impl ConfigResource {
    /// Declare a resource named `name`; the name doubles as the target path.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cluster: None,
            path: None,
            mode: default_mode(),
            config_hash: None,
            strict_keys: false,
            ensure: EnsureState::Present,
        }
    }

    /// Set the cluster identifier.
    #[must_use]
    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Set the override mapping.
    #[must_use]
    pub fn with_config_hash(mut self, config_hash: JsonValue) -> Self {
        self.config_hash = Some(config_hash);
        self
    }

    /// Write to `path` instead of the resource name.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the octal permission string, e.g. `"0640"`.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Reject malformed compact keys instead of keeping them literally.
    #[must_use]
    pub const fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    /// Choose whether the file should exist.
    #[must_use]
    pub const fn with_ensure(mut self, ensure: EnsureState) -> Self {
        self.ensure = ensure;
        self
    }

    /// Whether the file should exist.
    #[must_use]
    pub const fn ensure_state(&self) -> EnsureState {
        self.ensure
    }

    /// Resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cluster identifier, if declared.
    #[must_use]
    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    /// File the content is written to; defaults to the resource name.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        Utf8Path::new(self.path.as_deref().unwrap_or(&self.name))
    }

    /// Permission bits parsed from the declared octal mode.
    ///
    /// # Errors
    ///
    /// Returns [`UnicastError::Validation`] when the mode is not made of
    /// octal digits only or exceeds `7777`.
    pub fn mode(&self) -> UnicastResult<u32> {
        let invalid = |message: String| -> Arc<UnicastError> {
            Arc::new(UnicastError::Validation {
                key: String::from("mode"),
                message,
            })
        };
        if self.mode.is_empty() || !self.mode.bytes().all(|b| matches!(b, b'0'..=b'7')) {
            return Err(invalid(format!("'{}' is not an octal mode", self.mode)));
        }
        let bits = u32::from_str_radix(&self.mode, 8)
            .map_err(|err| invalid(format!("'{}' is not an octal mode: {err}", self.mode)))?;
        if bits > 0o7777 {
            return Err(invalid(format!("'{}' exceeds 7777", self.mode)));
        }
        Ok(bits)
    }

    /// Prepare the content computation for this resource.
    ///
    /// Peers come from the nodes `catalog` declares for the resource's cluster.
    ///
    /// # Errors
    ///
    /// Returns [`UnicastError::UnsupportedValue`] when the declared override
    /// mapping cannot be represented as a tree. Missing settings are reported
    /// when content is computed.
    pub fn builder(&self, catalog: &Catalog) -> UnicastResult<ContentBuilder> {
        let mode = if self.strict_keys {
            ExpandMode::Strict
        } else {
            ExpandMode::Permissive
        };
        let mut builder = ContentBuilder::new().expand_mode(mode);
        if let Some(cluster) = self.cluster() {
            builder = builder.cluster(cluster).peers(catalog.peers_for(cluster));
        }
        if let Some(config_hash) = &self.config_hash {
            builder = builder.overrides(Tree::try_from_json(config_hash.clone())?);
        }
        Ok(builder)
    }

    /// Compute the content this resource should have on disk.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`ConfigResource::builder`] and
    /// [`ContentBuilder::compute_expected`].
    pub fn expected_content(&self, catalog: &Catalog) -> UnicastResult<String> {
        self.builder(catalog)?.compute_expected()
    }

    /// Synchroniser for this resource's target file.
    ///
    /// # Errors
    ///
    /// Returns [`UnicastError::Validation`] when the declared mode is invalid.
    pub fn content_sync(&self) -> UnicastResult<ContentSync> {
        Ok(ContentSync::new(Utf8PathBuf::from(self.path())).with_mode(self.mode()?))
    }

    /// Bring the target file in line with the resource.
    ///
    /// A present resource has its content computed and written; nothing is
    /// written when computation fails. An absent resource has its file
    /// deleted without computing content.
    ///
    /// # Errors
    ///
    /// Propagates computation, validation and file errors.
    pub fn ensure(&self, catalog: &Catalog) -> UnicastResult<SyncOutcome> {
        if self.ensure == EnsureState::Absent {
            return ContentSync::new(Utf8PathBuf::from(self.path())).remove();
        }
        let sync = self.content_sync()?;
        let expected = self.expected_content(catalog)?;
        sync.ensure(&expected)
    }
}
