//! Error types produced while computing and synchronising managed content.

mod aggregate;
mod constructors;
mod conversions;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::UnicastError;
