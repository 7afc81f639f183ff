//! Output rendering.

use param_node::{JsonRuntime, Node};

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::Result;

/// Renders `tree` in the configured format.
///
/// XML output is the canonical serializer form. JSON output is the script
/// projection, pretty-printed unless `compact` is set.
///
/// # Errors
///
/// Returns [`crate::CliError::Tree`] if the projection fails and
/// [`crate::CliError::Json`] if serialisation fails.
pub fn render(tree: &Node, config: &AppConfig) -> Result<String> {
    match config.format {
        OutputFormat::Xml => Ok(tree.to_xml_text()),
        OutputFormat::Json => {
            let value = tree.project(&mut JsonRuntime::default(), false)?;
            let text = if config.compact {
                serde_json::to_string(value.as_ref())?
            } else {
                serde_json::to_string_pretty(value.as_ref())?
            };
            Ok(text)
        }
    }
}
