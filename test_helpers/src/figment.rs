//! Running catalog fixtures inside a `figment::Jail`.
//!
//! A jail switches into a fresh temporary directory, so catalog files written
//! by the closure can be loaded by relative path and are removed afterwards.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`] and returns its output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!("jail failed: {err}"))?;
    output.ok_or_else(|| anyhow!("jail closure produced no value"))
}

/// Converts a displayable error into a [`figment::Error`] so it can cross the
/// jail boundary with `?`.
#[must_use]
#[expect(
    clippy::needless_pass_by_value,
    reason = "call sites hand over owned errors from map_err"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
