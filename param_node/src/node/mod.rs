//! The parameter tree node.

mod scalar;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::Interned;

pub use scalar::Fixed;

/// Prefix marking children that were loaded from XML attributes.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Reserved key carrying the text of a node that also has children.
pub const TEXT_SLOT: &str = "_string";

/// Type-erased projection stored in a node's cache cell.
pub(crate) type CachedProjection = Arc<dyn Any + Send + Sync>;

static MISSING: Node = Node::missing();

/// A parameter tree node: a text value plus uniquely named children.
///
/// Children are kept in a [`BTreeMap`], so iteration, serialisation and
/// projection always visit them in lexicographic order. Nodes can only be
/// changed by loading another layer (see [`crate::load_str`] and friends);
/// readers only ever see shared references.
///
/// Lookups never fail: [`Node::get_child`] returns a shared sentinel whose
/// [`Node::is_valid`] is `false` when the child does not exist.
///
/// # Examples
///
/// ```rust
/// use param_node::{Node, load_str};
///
/// # fn main() -> param_node::ParamResult<()> {
/// let mut tree = Node::new();
/// load_str(&mut tree, r#"<Unit rank="elite"><Health>120</Health></Unit>"#, "unit")?;
/// let unit = tree.get_child("Unit");
/// assert_eq!(unit.get_child("Health").to_int(), 120);
/// assert_eq!(unit.get_child("@rank").text(), "elite");
/// assert_eq!(
///     unit.children().map(|(name, _)| name).collect::<Vec<_>>(),
///     ["@rank", "Health"],
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Node {
    value: String,
    children: BTreeMap<String, Node>,
    valid: bool,
    projection: OnceLock<CachedProjection>,
}

impl Node {
    /// Constructs a new, empty and valid node.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: String::new(),
            children: BTreeMap::new(),
            valid: true,
            projection: OnceLock::new(),
        }
    }

    const fn missing() -> Self {
        Self {
            value: String::new(),
            children: BTreeMap::new(),
            valid: false,
            projection: OnceLock::new(),
        }
    }

    /// Returns the child called `name`, or an invalid node when absent.
    #[must_use]
    pub fn get_child(&self, name: &str) -> &Self {
        self.children.get(name).unwrap_or(&MISSING)
    }

    /// Follows a `/`-separated chain of child names.
    ///
    /// Empty segments are skipped, so `"Identity//Classes"` and
    /// `"Identity/Classes"` are equivalent.
    #[must_use]
    pub fn get_path(&self, path: &str) -> &Self {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self, |node, segment| node.get_child(segment))
    }

    /// Returns `false` only for the "not found" sentinel.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the text content of this node.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Returns the text content as UTF-8 bytes.
    #[must_use]
    pub fn utf8_text(&self) -> Vec<u8> {
        self.value.as_bytes().to_vec()
    }

    /// Returns the text content as an interned handle.
    ///
    /// Only use this for predictably small and frequently repeated values;
    /// interned strings are never freed.
    #[must_use]
    pub fn interned_utf8_text(&self) -> Interned {
        Interned::new(&self.value)
    }

    /// Parses the text as an integer, yielding `0` when malformed.
    #[must_use]
    pub fn to_int(&self) -> i32 {
        scalar::parse_int(&self.value)
    }

    /// Parses the text as a 16.16 fixed-point number, yielding zero when
    /// malformed.
    #[must_use]
    pub fn to_fixed(&self) -> Fixed {
        Fixed::parse_lenient(&self.value)
    }

    /// Parses the text as a float, yielding `0.0` when malformed.
    #[must_use]
    pub fn to_float(&self) -> f32 {
        scalar::parse_float(&self.value)
    }

    /// Returns `true` only when the text is exactly `true`.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        scalar::parse_bool(&self.value)
    }

    /// Iterates over `(name, child)` pairs ordered by name.
    pub fn children(&self) -> impl ExactSizeIterator<Item = (&str, &Self)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Returns the ordered child map.
    #[must_use]
    pub const fn children_map(&self) -> &BTreeMap<String, Self> {
        &self.children
    }

    /// Number of direct children, attribute children included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when the node has neither text nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.children.is_empty()
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> &mut Self {
        self.children.entry(name.to_owned()).or_default()
    }

    pub(crate) fn existing_child_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.children.get_mut(name)
    }

    pub(crate) fn remove_child(&mut self, name: &str) -> Option<Self> {
        self.children.remove(name)
    }

    /// Drops every child, attribute children included, and reports whether
    /// any were present. The text value is kept.
    pub(crate) fn clear_children(&mut self) -> bool {
        if self.children.is_empty() {
            return false;
        }
        self.children.clear();
        self.reset_projection();
        true
    }

    pub(crate) fn insert_child(&mut self, name: &str, child: Self) {
        self.children.insert(name.to_owned(), child);
    }

    pub(crate) fn set_value(&mut self, value: String) {
        if self.value != value {
            self.value = value;
            self.reset_projection();
        }
    }

    /// Drops the cached projection of this node only.
    pub(crate) fn reset_projection(&mut self) {
        self.projection.take();
    }

    pub(crate) const fn projection_cell(&self) -> &OnceLock<CachedProjection> {
        &self.projection
    }

    pub(crate) fn has_cached_projection(&self) -> bool {
        self.projection.get().is_some()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.valid == other.valid && self.value == other.value && self.children == other.children
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("children", &self.children)
            .field("valid", &self.valid)
            .field("cached", &self.has_cached_projection())
            .finish()
    }
}
