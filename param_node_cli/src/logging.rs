//! Tracing subscriber set-up.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

static INIT_ONCE: Once = Once::new();

/// Builds the filter: `RUST_LOG` when set, otherwise `level`.
///
/// # Errors
///
/// Returns [`CliError::LogFilter`] when `level` is not a valid directive.
pub fn filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|source| CliError::LogFilter {
            filter: level.to_owned(),
            source,
        })
    })
}

/// Installs a stderr subscriber once per process; later calls only validate
/// `level`.
///
/// # Errors
///
/// Returns [`CliError::LogFilter`] when `level` is not a valid directive.
pub fn init(level: &str) -> Result<()> {
    let env_filter = filter(level)?;
    INIT_ONCE.call_once(|| {
        // Another subscriber may already be installed by a test harness.
        let _already_set = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{filter, init};
    use crate::CliError;

    #[test]
    fn init_is_idempotent() {
        assert!(init("warn").is_ok());
        assert!(init("debug").is_ok());
    }

    #[test]
    fn rejects_malformed_directives() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(matches!(
            filter("param_node=notalevel"),
            Err(CliError::LogFilter { .. })
        ));
    }
}
