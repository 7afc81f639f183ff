//! Constructors shared by the loader and merge helpers.

use std::sync::Arc;

use camino::Utf8Path;

use super::ParamError;

impl ParamError {
    /// Builds a [`ParamError::Parse`] for a failure at byte `offset` of `xml`.
    pub(crate) fn parse(
        source_name: &str,
        xml: &str,
        offset: usize,
        message: impl Into<String>,
    ) -> Arc<Self> {
        let consumed = xml.as_bytes().get(..offset).unwrap_or(xml.as_bytes());
        let line = consumed.iter().filter(|byte| **byte == b'\n').count() + 1;
        let column = consumed.iter().rev().take_while(|byte| **byte != b'\n').count() + 1;
        Arc::new(Self::Parse {
            source_name: source_name.to_owned(),
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
            message: message.into(),
        })
    }

    /// Builds a [`ParamError::Parse`] for input that is not UTF-8.
    pub(crate) fn not_utf8(source_name: &str, err: &std::str::Utf8Error) -> Arc<Self> {
        Arc::new(Self::Parse {
            source_name: source_name.to_owned(),
            line: 1,
            column: 1,
            message: format!("document is not valid UTF-8: {err}"),
        })
    }

    /// Builds a [`ParamError::Source`] for a failed document read.
    pub(crate) fn read_failure(
        path: &Utf8Path,
        origin: String,
        source: std::io::Error,
    ) -> Arc<Self> {
        Arc::new(Self::Source {
            path: path.to_owned(),
            origin,
            source,
        })
    }

    /// Builds a [`ParamError::Projection`].
    ///
    /// # Examples
    ///
    /// ```
    /// use param_node::ParamError;
    /// let err = ParamError::projection("object quota exceeded");
    /// assert!(matches!(&*err, ParamError::Projection { .. }));
    /// ```
    #[must_use]
    pub fn projection(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::Projection {
            message: message.into(),
        })
    }

    /// Returns the document identity for layer-specific failures.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::Parse { source_name, .. } => Some(source_name),
            Self::Source { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }
}
