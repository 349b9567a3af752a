//! Constructors and aggregation helpers for `UnicastError`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use figment::Error as FigmentError;

use super::{AggregatedErrors, UnicastError};

impl UnicastError {
    /// Tries to build a [`UnicastError`] from an iterator of errors.
    ///
    /// Returns `None` for an empty iterator and the sole error itself when
    /// exactly one uniquely-owned error is supplied. A single shared error, or
    /// two or more errors, become [`Self::Aggregate`].
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let only = arcs.pop()?;
        Some(Arc::try_unwrap(only).unwrap_or_else(|shared| {
            Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
        }))
    }

    /// Build a [`UnicastError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`UnicastError::try_aggregate`] when
    /// the list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Report a required setting that was not supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicast_config::UnicastError;
    /// let e = UnicastError::missing("cluster");
    /// assert_eq!(e.to_string(), "Required setting 'cluster' missing");
    /// ```
    #[must_use]
    pub fn missing(setting: impl Into<String>) -> Self {
        Self::Configuration {
            setting: setting.into(),
        }
    }

    /// Report a compact key rejected by strict validation.
    #[must_use]
    pub fn malformed_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Construct a gathering error from a [`figment::Error`].
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Construct a file error for `path`, wrapped for sharing.
    #[must_use]
    pub fn file(path: &Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        })
    }
}
