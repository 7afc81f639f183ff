//! Template inheritance via the root `parent` attribute.
//!
//! A template called `units/hoplite` lives at `units/hoplite.xml`. When its
//! root element carries `parent="units/infantry"`, the parent template is
//! applied first and the child is merged over it, recursively, so the layer
//! chain is always applied ancestor-first.

use std::borrow::Borrow;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use tracing::debug;

use crate::markup::Element;
use crate::{Node, ParamError, ParamResult, apply_layer};

use super::read_root;
use super::source::DocumentSource;

/// Root attribute naming the template a document inherits from.
pub const PARENT_ATTRIBUTE: &str = "parent";

/// Resolves named templates and their inheritance chains.
///
/// Resolved trees are cached by name for the lifetime of the loader.
///
/// # Examples
///
/// ```rust
/// use param_node::{MemorySource, TemplateLoader};
///
/// # fn main() -> param_node::ParamResult<()> {
/// let source = MemorySource::new()
///     .with_document("template_unit.xml", "<Entity><Health>100</Health><Speed>9</Speed></Entity>")
///     .with_document(
///         "units/hoplite.xml",
///         r#"<Entity parent="template_unit"><Health>130</Health></Entity>"#,
///     );
/// let mut loader = TemplateLoader::new(source);
/// let hoplite = loader.resolve("units/hoplite")?;
/// assert_eq!(hoplite.get_path("Entity/Health").to_int(), 130);
/// assert_eq!(hoplite.get_path("Entity/Speed").to_int(), 9);
/// assert!(!hoplite.get_path("Entity/@parent").is_valid());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TemplateLoader<S> {
    source: S,
    resolved: BTreeMap<String, Node>,
}

impl<S: DocumentSource> TemplateLoader<S> {
    /// Creates a loader reading templates from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            resolved: BTreeMap::new(),
        }
    }

    /// Returns the underlying document source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Path of the document holding template `name`.
    #[must_use]
    pub fn template_path(name: &str) -> Utf8PathBuf {
        template_path(name)
    }

    /// Resolves template `name`, applying its ancestors first.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::CyclicParent`] when the inheritance chain loops,
    /// [`ParamError::MissingParent`] when an ancestor does not exist, and
    /// [`ParamError::Source`] or [`ParamError::Parse`] for unreadable layers.
    pub fn resolve(&mut self, name: &str) -> ParamResult<&Node> {
        match self.resolved.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let chain = read_chain(&self.source, name)?;
                let mut tree = Node::new();
                for (path, root) in &chain {
                    debug!(template = name, layer = %path, "applying template layer");
                    apply_layer(&mut tree, root);
                }
                Ok(entry.insert(tree))
            }
        }
    }

    /// Returns the documents making up template `name`, ancestor first.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TemplateLoader::resolve`].
    pub fn layer_chain(&self, name: &str) -> ParamResult<Vec<Utf8PathBuf>> {
        Ok(read_chain(&self.source, name)?
            .into_iter()
            .map(|(path, _)| path)
            .collect())
    }

    /// Resolves `name` and keeps only the permitted children of its root
    /// element, e.g. to build a placement preview of a unit template.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`TemplateLoader::resolve`].
    pub fn resolve_filtered<P>(&mut self, name: &str, permitted: &BTreeSet<P>) -> ParamResult<Node>
    where
        P: Borrow<str> + Ord,
    {
        let full = self.resolve(name)?;
        let mut filtered = Node::new();
        for (root_name, _) in full.children() {
            apply_layer(&mut filtered, &Element::new(root_name));
            filtered.copy_filtered_children_of_child(full, root_name, permitted)?;
        }
        Ok(filtered)
    }

    /// Drops every cached template.
    pub fn clear(&mut self) {
        self.resolved.clear();
    }
}

/// Reads template `name` and its ancestors, ancestor first, with the
/// `parent` attribute stripped from every root.
fn read_chain<S>(source: &S, name: &str) -> ParamResult<Vec<(Utf8PathBuf, Element)>>
where
    S: DocumentSource + ?Sized,
{
    let mut chain = Vec::new();
    let mut visited: Vec<String> = Vec::new();
    let mut current = name.to_owned();
    loop {
        if visited.contains(&current) {
            visited.push(current);
            return Err(Arc::new(ParamError::CyclicParent {
                cycle: visited.join(" -> "),
            }));
        }
        let path = template_path(&current);
        let mut root = match (read_root(source, &path), visited.last()) {
            (Ok(root), _) => root,
            (Err(err), Some(child)) if is_not_found(&err) => {
                return Err(Arc::new(ParamError::MissingParent {
                    template: child.clone(),
                    parent: current,
                }));
            }
            (Err(err), _) => return Err(err),
        };
        let parent = root.take_attribute(PARENT_ATTRIBUTE);
        if parent.as_deref() == Some("") {
            return Err(Arc::new(ParamError::MissingParent {
                template: current,
                parent: String::new(),
            }));
        }
        chain.push((path, root));
        visited.push(current);
        match parent {
            Some(next) => current = next,
            None => break,
        }
    }
    chain.reverse();
    Ok(chain)
}

fn template_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{name}.xml"))
}

fn is_not_found(err: &ParamError) -> bool {
    matches!(err, ParamError::Source { source, .. } if source.kind() == io::ErrorKind::NotFound)
}
