//! Command-line surface of `paramtree`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command-line surface exposed by the binary.
#[derive(Debug, Parser)]
#[command(
    name = "paramtree",
    bin_name = "paramtree",
    about = "Merge layered XML templates into a single parameter tree",
    version
)]
pub struct CommandLine {
    /// Overrides configuration discovery with an explicit file path.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        global = true,
        help = "Path to the configuration file"
    )]
    pub config_path: Option<Utf8PathBuf>,
    /// Settings that override configuration files and the environment.
    #[command(flatten)]
    pub globals: GlobalArgs,
    /// Selected operation.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
///
/// Unset flags are omitted when serialised so they do not mask lower
/// configuration layers.
#[derive(Debug, Default, Args, Serialize)]
pub struct GlobalArgs {
    /// Directory that layer paths and template names are resolved against.
    #[arg(long, value_name = "DIR", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<Utf8PathBuf>,
    /// Output format.
    #[arg(long, value_enum, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// Tracing filter used when `RUST_LOG` is unset, e.g. `debug`.
    #[arg(long, value_name = "FILTER", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Print JSON on a single line.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compact: bool,
}

/// How the resolved tree is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Canonical XML, attributes and children in name order.
    #[default]
    Xml,
    /// The script projection rendered as JSON.
    Json,
}

/// Operations offered by `paramtree`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge documents in the order given; later layers override earlier ones.
    Merge {
        /// Layer documents, relative to the root directory.
        #[arg(required = true, value_name = "LAYER")]
        layers: Vec<Utf8PathBuf>,
    },
    /// Resolve a template and its `parent` chain.
    Template {
        /// Template name, e.g. `units/athen_hoplite` for `units/athen_hoplite.xml`.
        name: String,
        /// Keep only these children of the root element.
        #[arg(long, value_delimiter = ',', value_name = "NAMES")]
        keep: Vec<String>,
    },
    /// List the documents a template is built from, ancestor first.
    Chain {
        /// Template name.
        name: String,
    },
}
