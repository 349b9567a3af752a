//! Trait-based conversions between external error types and `UnicastError`.

use figment::Error as FigmentError;

use super::UnicastError;

/// JSON decoding failures surface as catalog gathering errors.
impl From<serde_json::Error> for UnicastError {
    fn from(e: serde_json::Error) -> Self {
        Self::gathering(FigmentError::from(format!(
            "JSON error: {} at line {}, column {}",
            e,
            e.line(),
            e.column()
        )))
    }
}

impl From<FigmentError> for UnicastError {
    fn from(e: FigmentError) -> Self {
        Self::gathering(e)
    }
}
