//! Running configuration tests inside a `figment::Jail`.
//!
//! The jail gives each test its own working directory and restores any
//! environment variables it sets, so `paramtree.toml` discovery and
//! `PARAMTREE_*` overrides can be exercised without leaking between tests.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
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
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts a displayable error into a [`figment::Error`] so `?` works inside
/// jail closures.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a map_err adaptor, which hands over ownership"
)]
pub fn jail_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{jail_error, with_jail};
    use anyhow::{Result, ensure};

    #[test]
    fn returns_closure_output_and_scopes_env() -> Result<()> {
        let value = with_jail(|jail| {
            jail.set_env("PARAM_NODE_HELPER_PROBE", "1");
            std::env::var("PARAM_NODE_HELPER_PROBE").map_err(jail_error)
        })?;
        ensure!(value == "1", "unexpected value {value}");
        ensure!(
            std::env::var("PARAM_NODE_HELPER_PROBE").is_err(),
            "jail leaked environment"
        );
        Ok(())
    }

    #[test]
    fn propagates_closure_failures() {
        let result: Result<()> = with_jail(|_| Err(jail_error("boom")));
        assert!(result.is_err_and(|err| err.to_string().contains("boom")));
    }
}
