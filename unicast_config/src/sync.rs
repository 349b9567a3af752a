//! Bringing a managed file in line with its computed content.
//!
//! Content is compared byte for byte; checksums only stand in for content in
//! logs and outcomes so large documents are never echoed.

use std::io::{self, ErrorKind};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::UnicastResult;
use crate::render::is_no_content;
use crate::result_ext::FileResultExt;

/// Hex-encoded SHA-256 digest of `content`.
///
/// # Examples
///
/// ```
/// let digest = unicast_config::checksum("");
/// assert_eq!(
///     digest,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// );
/// ```
#[must_use]
pub fn checksum(content: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(content.as_ref()))
}

/// What [`ContentSync::ensure`] or [`ContentSync::remove`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncOutcome {
    /// The file already held the expected content.
    Unchanged {
        /// Checksum of the content on disk.
        checksum: String,
    },
    /// The file did not exist and was written.
    Created {
        /// Checksum of the written content.
        checksum: String,
    },
    /// The file held different content and was rewritten.
    Updated {
        /// Checksum of the replaced content.
        previous: String,
        /// Checksum of the written content.
        checksum: String,
    },
    /// The file existed and was deleted.
    Removed {
        /// Checksum of the deleted content.
        previous: String,
    },
    /// The file was to be removed and did not exist.
    Absent,
    /// The expected content was the no-content placeholder; nothing was done.
    Skipped,
}

impl SyncOutcome {
    /// Returns `true` when the file was written or deleted.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(
            self,
            Self::Created { .. } | Self::Updated { .. } | Self::Removed { .. }
        )
    }
}

/// Keeps one file's content, and optionally its mode, as expected.
#[derive(Clone, Debug)]
pub struct ContentSync {
    path: Utf8PathBuf,
    mode: Option<u32>,
}

impl ContentSync {
    /// Manage the file at `path`, leaving its permissions alone.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: None,
        }
    }

    /// Apply `mode` to the file whenever it is ensured.
    #[must_use]
    pub const fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Managed file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn parent_dir(&self) -> &Utf8Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."))
    }

    fn file_name(&self) -> UnicastResult<&str> {
        self.path
            .file_name()
            .ok_or_else(|| io::Error::other("managed path has no file name"))
            .for_file(self.path.as_std_path())
    }

    fn open_parent(&self) -> UnicastResult<Dir> {
        Dir::open_ambient_dir(self.parent_dir(), ambient_authority())
            .for_file(self.path.as_std_path())
    }

    /// Read the file's current bytes.
    ///
    /// A missing file (or missing parent directory) reads as `None`. So does
    /// a file that cannot be read for lack of permission, after a warning.
    /// Content need not be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnicastError::File`] for any other I/O failure.
    pub fn current(&self) -> UnicastResult<Option<Vec<u8>>> {
        let name = self.file_name()?;
        let read = Dir::open_ambient_dir(self.parent_dir(), ambient_authority())
            .and_then(|dir| dir.read(name));
        match read {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                warn!(path = %self.path, "could not read managed file; permission denied");
                Ok(None)
            }
            Err(err) => Err(err).for_file(self.path.as_std_path()),
        }
    }

    /// Returns `true` when the file already holds `expected`.
    ///
    /// The no-content placeholder is always in sync: it means nothing is
    /// managed yet.
    ///
    /// # Errors
    ///
    /// Propagates read failures from [`ContentSync::current`].
    pub fn is_in_sync(&self, expected: &str) -> UnicastResult<bool> {
        if is_no_content(expected) {
            return Ok(true);
        }
        Ok(self.current()?.as_deref() == Some(expected.as_bytes()))
    }

    /// Write `expected` verbatim unless the file already holds it, then make
    /// sure the configured mode is applied.
    ///
    /// New content is written to a hidden sibling that receives the mode
    /// before it is renamed into place, so the target never carries the
    /// wrong permissions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnicastError::File`] when the parent directory cannot
    /// be opened or the file cannot be written. A failed write leaves the
    /// target untouched and removes the staging file.
    pub fn ensure(&self, expected: &str) -> UnicastResult<SyncOutcome> {
        if is_no_content(expected) {
            warn!(path = %self.path, "refusing to write placeholder content");
            return Ok(SyncOutcome::Skipped);
        }
        let outcome = match self.current()? {
            Some(existing) if existing == expected.as_bytes() => {
                let dir = self.open_parent()?;
                self.set_mode(&dir, self.file_name()?)
                    .for_file(self.path.as_std_path())?;
                SyncOutcome::Unchanged {
                    checksum: checksum(&existing),
                }
            }
            Some(existing) => {
                self.write(expected.as_bytes())?;
                SyncOutcome::Updated {
                    previous: checksum(&existing),
                    checksum: checksum(expected),
                }
            }
            None => {
                self.write(expected.as_bytes())?;
                SyncOutcome::Created {
                    checksum: checksum(expected),
                }
            }
        };
        match &outcome {
            SyncOutcome::Updated { previous, checksum } => {
                info!(path = %self.path, from = %previous, to = %checksum, "content changed");
            }
            SyncOutcome::Created { checksum } => {
                info!(path = %self.path, to = %checksum, "content created");
            }
            SyncOutcome::Unchanged { checksum } => {
                debug!(path = %self.path, checksum = %checksum, "content in sync");
            }
            SyncOutcome::Removed { .. } | SyncOutcome::Absent | SyncOutcome::Skipped => {}
        }
        Ok(outcome)
    }

    /// Delete the managed file if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::UnicastError::File`] when the file exists but cannot
    /// be read or deleted.
    pub fn remove(&self) -> UnicastResult<SyncOutcome> {
        let Some(existing) = self.current()? else {
            debug!(path = %self.path, "managed file already absent");
            return Ok(SyncOutcome::Absent);
        };
        let dir = self.open_parent()?;
        dir.remove_file(self.file_name()?)
            .for_file(self.path.as_std_path())?;
        let previous = checksum(&existing);
        info!(path = %self.path, from = %previous, "content removed");
        Ok(SyncOutcome::Removed { previous })
    }

    fn write(&self, content: &[u8]) -> UnicastResult<()> {
        let name = self.file_name()?;
        let dir = self.open_parent()?;
        self.stage_and_rename(&dir, name, content)
            .for_file(self.path.as_std_path())
    }

    fn stage_and_rename(&self, dir: &Dir, name: &str, content: &[u8]) -> io::Result<()> {
        let staging = format!(".{name}.tmp");
        let staged = dir
            .write(&staging, content)
            .and_then(|()| self.set_mode(dir, &staging))
            .and_then(|()| dir.rename(&staging, dir, name));
        if staged.is_err() {
            match dir.remove_file(&staging) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    warn!(path = %self.path, error = %cleanup, "could not remove staging file");
                }
                _ => {}
            }
        }
        staged
    }

    #[cfg(unix)]
    fn set_mode(&self, dir: &Dir, name: &str) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let Some(mode) = self.mode else {
            return Ok(());
        };
        let permissions =
            cap_std::fs::Permissions::from_std(std::fs::Permissions::from_mode(mode));
        dir.set_permissions(name, permissions)
    }

    #[cfg(not(unix))]
    fn set_mode(&self, _dir: &Dir, _name: &str) -> io::Result<()> {
        if self.mode.is_some() {
            debug!(path = %self.path, "file modes are not applied on this platform");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentSync, SyncOutcome, checksum};
    use crate::render::NO_CONTENT;

    fn managed(dir: &tempfile::TempDir, name: &str) -> ContentSync {
        let path = dir.path().join(name);
        ContentSync::new(path.to_str().expect("utf-8 path"))
    }

    #[test]
    fn checksum_is_stable_hex() {
        assert_eq!(checksum("a"), checksum("a"));
        assert_ne!(checksum("a"), checksum("b"));
        assert_eq!(checksum("a").len(), 64);
        assert_eq!(checksum("a"), checksum(b"a"));
    }

    #[test]
    fn placeholder_is_never_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sync = managed(&dir, "managed.yml");
        assert_eq!(sync.ensure(NO_CONTENT).expect("ensure"), SyncOutcome::Skipped);
        assert!(!dir.path().join("managed.yml").exists());
        assert!(sync.is_in_sync(NO_CONTENT).expect("in sync"));
    }

    #[test]
    fn missing_parent_reads_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("managed.yml");
        let sync = ContentSync::new(path.to_str().expect("utf-8 path"));
        assert_eq!(sync.current().expect("read"), None);
        assert!(!sync.is_in_sync("x").expect("compare"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_rename_removes_the_staging_file() {
        use std::fs;

        use cap_std::{ambient_authority, fs_utf8::Dir};

        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("managed.yml")).expect("directory in the way");
        fs::write(dir.path().join("managed.yml").join("keep"), "x").expect("occupy directory");
        let sync = managed(&dir, "managed.yml").with_mode(0o600);
        let parent = Dir::open_ambient_dir(
            dir.path().to_str().expect("utf-8 path"),
            ambient_authority(),
        )
        .expect("open parent");

        let result = sync.stage_and_rename(&parent, "managed.yml", b"a: 1\n");

        assert!(result.is_err(), "rename onto a directory must fail");
        assert!(!dir.path().join(".managed.yml.tmp").exists());
        assert!(dir.path().join("managed.yml").join("keep").exists());
    }
}
