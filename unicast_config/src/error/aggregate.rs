//! Aggregation container and iteration support for multiple `UnicastError` values.

use std::{error::Error, fmt, sync::Arc};

use super::UnicastError;

/// Collection of [`UnicastError`]s produced during a single computation.
///
/// # Examples
///
/// ```
/// use unicast_config::UnicastError;
/// let e = UnicastError::aggregate(vec![
///     UnicastError::missing("cluster"),
///     UnicastError::missing("config_hash"),
/// ]);
/// if let UnicastError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<UnicastError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<UnicastError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &UnicastError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.iter().enumerate();
        if let Some((_, first)) = entries.next() {
            write!(f, "1: {first}")?;
        }
        for (index, entry) in entries {
            write!(f, "\n{}: {entry}", index + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<UnicastError>;
    type IntoIter = std::vec::IntoIter<Arc<UnicastError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
