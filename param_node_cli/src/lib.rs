//! Library side of the `paramtree` command.
//!
//! `paramtree` merges layered XML documents from a template directory and
//! prints the resolved tree. Settings are layered the same way as the
//! documents themselves: built-in defaults, then `paramtree.toml`, then
//! `PARAMTREE_*` environment variables, then command-line flags.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;

pub use cli::{Commands, CommandLine, GlobalArgs, OutputFormat};
pub use config::AppConfig;
pub use error::{CliError, Result};

/// Loads configuration, executes the selected command and renders its output.
///
/// # Errors
///
/// Returns [`CliError`] when configuration, loading or rendering fails.
pub fn run(cli: &CommandLine) -> Result<String> {
    let config = config::load(&cli.globals, cli.config_path.as_deref())?;
    logging::init(&config.log_level)?;
    tracing::debug!(?config, "resolved configuration");
    commands::execute(&cli.command, &config)
}
