//! Extensions for mapping errors to `UnicastResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `UnicastResult<T>` alias (`Result<T, Arc<UnicastError>>`).
//!
//! # Examples
//!
//! ```
//! use unicast_config::{UnicastResult, UnicastResultExt};
//!
//! fn parse() -> UnicastResult<serde_json::Value> {
//!     serde_json::from_str("{}").into_unicast()
//! }
//! # assert!(parse().is_ok());
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::{UnicastError, UnicastResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<UnicastError>`
/// into a `UnicastResult<T>`.
pub trait UnicastResultExt<T, E> {
    /// Convert `Result<T, E>` into `UnicastResult<T>` using `Into<UnicastError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<UnicastError>`.
    fn into_unicast(self) -> UnicastResult<T>;
}

impl<T, E> UnicastResultExt<T, E> for Result<T, E>
where
    E: Into<UnicastError>,
{
    fn into_unicast(self) -> UnicastResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension attributing I/O failures to the file they concern.
pub(crate) trait FileResultExt<T> {
    /// Convert an I/O result into a [`UnicastError::File`] for `path`.
    fn for_file(self, path: &Path) -> UnicastResult<T>;
}

impl<T> FileResultExt<T> for std::io::Result<T> {
    fn for_file(self, path: &Path) -> UnicastResult<T> {
        self.map_err(|e| UnicastError::file(path, e))
    }
}
