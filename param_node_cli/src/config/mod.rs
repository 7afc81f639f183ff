//! Layered settings for `paramtree`.
//!
//! Precedence, lowest first: built-in defaults, the configuration file,
//! `PARAMTREE_*` environment variables, command-line flags.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::error::{CliError, Result};

/// File looked up in the working directory (and its ancestors) when no
/// `--config` path is given.
pub const CONFIG_FILE: &str = "paramtree.toml";

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "PARAMTREE_";

/// Resolved settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template directory.
    pub root: Utf8PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Print JSON on a single line.
    pub compact: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            format: OutputFormat::Xml,
            log_level: "warn".to_owned(),
            compact: false,
        }
    }
}

/// Builds the layered figment without extracting it.
///
/// # Errors
///
/// Returns [`CliError::MissingConfigFile`] when `config_path` names a file
/// that does not exist.
pub fn figment(globals: &GlobalArgs, config_path: Option<&Utf8Path>) -> Result<Figment> {
    let file = match config_path {
        Some(path) if !path.is_file() => {
            return Err(CliError::MissingConfigFile(path.to_owned()));
        }
        Some(path) => Toml::file(path),
        None => Toml::file(CONFIG_FILE),
    };
    Ok(Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(globals)))
}

/// Loads the settings for this invocation.
///
/// # Errors
///
/// Returns [`CliError::MissingConfigFile`] for an absent `--config` file and
/// [`CliError::Configuration`] when a layer holds invalid values.
pub fn load(globals: &GlobalArgs, config_path: Option<&Utf8Path>) -> Result<AppConfig> {
    Ok(figment(globals, config_path)?.extract()?)
}
