//! Document loading entrypoints.
//!
//! Loading is additive: each call merges one document onto the existing tree
//! (see [`crate::apply_layer`]). Inheritance chains are expressed by loading
//! a base document and then each override in order. A document is parsed
//! completely before it is merged, so a malformed layer leaves the tree as it
//! was before that layer.

mod source;
mod template;

use camino::Utf8Path;
use tracing::debug;

use crate::markup::{Element, MarkupElement};
use crate::{Node, ParamError, ParamResult, apply_layer};

pub use source::{DirSource, DocumentSource, MemorySource};
pub use template::{PARENT_ATTRIBUTE, TemplateLoader};

/// Parses `xml` and merges its root element into `target`.
///
/// `source_name` identifies the layer in error reports.
///
/// # Errors
///
/// Returns [`ParamError::Parse`] when `xml` is not well-formed; `target` is
/// left unchanged.
pub fn load_str(target: &mut Node, xml: &str, source_name: &str) -> ParamResult<()> {
    let root = Element::parse(xml, source_name)?;
    apply_document(target, &root, source_name);
    Ok(())
}

/// Parses a UTF-8 buffer and merges its root element into `target`.
///
/// # Errors
///
/// Returns [`ParamError::Parse`] when the bytes are not UTF-8 or not
/// well-formed; `target` is left unchanged.
pub fn load_bytes(target: &mut Node, bytes: &[u8], source_name: &str) -> ParamResult<()> {
    let root = Element::parse_bytes(bytes, source_name)?;
    apply_document(target, &root, source_name);
    Ok(())
}

/// Reads `path` from `source` and merges it into `target`.
///
/// # Errors
///
/// Returns [`ParamError::Source`] when the document cannot be read and
/// [`ParamError::Parse`] when it is malformed.
pub fn load_path<S>(target: &mut Node, source: &S, path: &Utf8Path) -> ParamResult<()>
where
    S: DocumentSource + ?Sized,
{
    let root = read_root(source, path)?;
    apply_document(target, &root, path.as_str());
    Ok(())
}

/// Loads each path in order, stopping at the first failure.
///
/// Layers applied before the failing one stay applied; the error names the
/// layer that failed.
///
/// # Errors
///
/// Returns the first [`ParamError::Source`] or [`ParamError::Parse`]
/// encountered.
///
/// # Examples
///
/// ```rust
/// use param_node::{MemorySource, Node, load_all};
///
/// # fn main() -> param_node::ParamResult<()> {
/// let source = MemorySource::new()
///     .with_document("base.xml", "<Unit><Hp>100</Hp><Speed>9</Speed></Unit>")
///     .with_document("elite.xml", "<Unit><Hp>150</Hp></Unit>");
/// let mut tree = Node::new();
/// load_all(&mut tree, &source, ["base.xml", "elite.xml"])?;
/// assert_eq!(tree.get_path("Unit/Hp").to_int(), 150);
/// assert_eq!(tree.get_path("Unit/Speed").to_int(), 9);
/// # Ok(())
/// # }
/// ```
pub fn load_all<S, I, P>(target: &mut Node, source: &S, paths: I) -> ParamResult<()>
where
    S: DocumentSource + ?Sized,
    I: IntoIterator<Item = P>,
    P: AsRef<Utf8Path>,
{
    for path in paths {
        load_path(target, source, path.as_ref())?;
    }
    Ok(())
}

pub(crate) fn read_root<S>(source: &S, path: &Utf8Path) -> ParamResult<Element>
where
    S: DocumentSource + ?Sized,
{
    let bytes = source
        .read(path)
        .map_err(|err| ParamError::read_failure(path, source.describe(), err))?;
    Element::parse_bytes(&bytes, path.as_str())
}

fn apply_document(target: &mut Node, root: &Element, source_name: &str) {
    debug!(source = source_name, root = root.name(), "applying layer");
    apply_layer(target, root);
}
