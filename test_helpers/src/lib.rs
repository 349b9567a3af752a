//! Test helpers shared across crates in the unicast-config workspace.
//!
//! [`figment`] wraps `figment::Jail` so catalog tests can stage files without
//! hand-written `Option` plumbing. [`document`] builds the exact text a
//! rendered configuration document is expected to contain. [`result`] turns
//! crate errors into `anyhow` errors so test bodies can use `?`.

pub mod document;
pub mod figment;
pub mod result;
