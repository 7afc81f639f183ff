//! Error types for the `paramtree` command.

use std::sync::Arc;

use camino::Utf8PathBuf;
use param_node::ParamError;
use thiserror::Error;

/// Errors raised while running `paramtree`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration layers could not be merged or deserialised.
    #[error("failed to load configuration: {0}")]
    Configuration(#[source] Box<figment::Error>),
    /// `--config` named a file that does not exist.
    #[error("configuration file '{0}' does not exist")]
    MissingConfigFile(Utf8PathBuf),
    /// Loading or merging the parameter tree failed.
    #[error(transparent)]
    Tree(#[from] Arc<ParamError>),
    /// The configured log filter is not a valid directive.
    #[error("invalid log filter '{filter}': {source}")]
    LogFilter {
        /// Filter text that was rejected.
        filter: String,
        /// Parser diagnostic.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    /// JSON rendering failed.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Configuration(Box::new(err))
    }
}

/// Result alias used throughout the command.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
