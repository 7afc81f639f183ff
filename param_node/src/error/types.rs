//! Primary error enum for parameter tree operations.

use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading, merging or projecting trees.
///
/// A missing child is not an error: [`crate::Node::get_child`] returns an
/// invalid sentinel instead. Malformed scalar text is not an error either.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParamError {
    /// A layer document is not well-formed markup.
    #[error("failed to parse '{source_name}' at {line}:{column}: {message}")]
    Parse {
        /// Identity of the document that failed (path or caller-supplied name).
        source_name: String,
        /// One-based line of the failure.
        line: u32,
        /// One-based column of the failure.
        column: u32,
        /// Parser diagnostic.
        message: String,
    },

    /// A document could not be read from its source.
    #[error("failed to read '{path}' from {origin}: {source}")]
    Source {
        /// Logical path that was requested.
        path: Utf8PathBuf,
        /// Description of the source that was asked for the document.
        origin: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A filtered clone was requested for a child one side does not have.
    #[error("filtered copy requires child '{name}' in the {side} node")]
    MissingChild {
        /// Name of the required child.
        name: String,
        /// Which node lacked the child.
        side: TreeSide,
    },

    /// Template inheritance loops back on itself.
    #[error("cyclic template inheritance detected: {cycle}")]
    CyclicParent {
        /// Chain of template names participating in the cycle.
        cycle: String,
    },

    /// A template names a parent that does not exist.
    #[error("template '{template}' inherits from missing parent '{parent}'")]
    MissingParent {
        /// Template that declared the parent.
        template: String,
        /// Parent template name that could not be found.
        parent: String,
    },

    /// The scripting runtime rejected a projected value.
    #[error("failed to project node into script value: {message}")]
    Projection {
        /// Runtime diagnostic.
        message: String,
    },
}

/// Identifies the node that violated a filtered-copy precondition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TreeSide {
    /// The node being copied into.
    Target,
    /// The node being copied from.
    Source,
}

impl fmt::Display for TreeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Target => "target",
            Self::Source => "source",
        })
    }
}
