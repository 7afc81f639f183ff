//! Subcommand dispatch.

use std::collections::BTreeSet;

use param_node::{DirSource, Node, TemplateLoader, load_all};
use tracing::info;

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::error::Result;
use crate::render::render;

/// Runs `command` against the configured template directory and returns the
/// text to print.
///
/// # Errors
///
/// Returns [`crate::CliError::Tree`] when the directory or a layer cannot be
/// loaded, and [`crate::CliError::Json`] when JSON rendering fails.
pub fn execute(command: &Commands, config: &AppConfig) -> Result<String> {
    let source = DirSource::open(&config.root)?;
    match command {
        Commands::Merge { layers } => {
            info!(root = %config.root, layers = layers.len(), "merging layers");
            let mut tree = Node::new();
            load_all(&mut tree, &source, layers)?;
            render(&tree, config)
        }
        Commands::Template { name, keep } => {
            let mut loader = TemplateLoader::new(source);
            if keep.is_empty() {
                render(loader.resolve(name)?, config)
            } else {
                let permitted: BTreeSet<&str> = keep.iter().map(String::as_str).collect();
                render(&loader.resolve_filtered(name, &permitted)?, config)
            }
        }
        Commands::Chain { name } => {
            let chain = TemplateLoader::new(source).layer_chain(name)?;
            Ok(chain
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
