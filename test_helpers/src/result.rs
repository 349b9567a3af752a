//! Bridging crate results into `anyhow` in test bodies.

use std::fmt::Display;

use anyhow::{Result, anyhow};

/// Converts any result with a displayable error into an [`anyhow::Result`].
pub trait ToAnyhow<T> {
    /// Map the error through its `Display` output.
    ///
    /// # Errors
    ///
    /// Returns the original error rendered as an [`anyhow::Error`].
    fn to_anyhow(self) -> Result<T>;
}

impl<T, E: Display> ToAnyhow<T> for std::result::Result<T, E> {
    fn to_anyhow(self) -> Result<T> {
        self.map_err(|err| anyhow!("{err}"))
    }
}
