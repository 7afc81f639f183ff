//! Projection of trees into an embedded scripting runtime.
//!
//! A leaf node projects to a string (or to the runtime's "undefined" when it
//! is empty). A node with children projects to a keyed object whose keys are
//! the child names, `@` prefixes included. A node that has both text and
//! children stores the text under the `_string` key.
//!
//! Projections may be cached on the node. The cache lives until the node is
//! touched by a later merge. It is *not* cleared when a descendant changes
//! without its ancestors being merged into, and it is not tied to a runtime
//! context: callers must only use cached projections with the context that
//! created them.

mod json;

use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::ParamResult;
use crate::node::{CachedProjection, Node, TEXT_SLOT};

pub use json::JsonRuntime;

/// Value model of a scripting runtime that trees can be projected into.
pub trait ScriptRuntime {
    /// Runtime value handle.
    type Value: Send + Sync + 'static;

    /// The runtime's "no value" marker, used for empty leaves.
    fn undefined(&mut self) -> Self::Value;

    /// Builds a string value.
    fn string(&mut self, text: &str) -> Self::Value;

    /// Builds a keyed object from `entries`, which arrive in child-name
    /// order followed by the `_string` entry when the node has text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ParamError::Projection`] when the runtime cannot
    /// allocate or populate the object.
    fn object(&mut self, entries: Vec<(&str, Self::Value)>) -> ParamResult<Self::Value>;
}

impl Node {
    /// Projects this node and its subtree into `runtime`.
    ///
    /// With `cache` set, the first projection is stored on the node and later
    /// calls return the same [`Arc`] until a merge touches this node. A cached
    /// value produced by a different runtime type is bypassed rather than
    /// replaced.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::ParamError::Projection`] failures from the runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use param_node::{JsonRuntime, Node, load_str};
    /// use serde_json::json;
    ///
    /// # fn main() -> param_node::ParamResult<()> {
    /// let mut tree = Node::new();
    /// load_str(&mut tree, r#"<Unit><A attr="value">example</A><D>new</D></Unit>"#, "unit")?;
    /// let mut runtime = JsonRuntime::default();
    /// let first = tree.project(&mut runtime, true)?;
    /// assert_eq!(
    ///     *first,
    ///     json!({"Unit": {"A": {"@attr": "value", "_string": "example"}, "D": "new"}}),
    /// );
    /// assert!(Arc::ptr_eq(&first, &tree.project(&mut runtime, true)?));
    /// # Ok(())
    /// # }
    /// ```
    pub fn project<R: ScriptRuntime>(
        &self,
        runtime: &mut R,
        cache: bool,
    ) -> ParamResult<Arc<R::Value>> {
        // The missing-child sentinel is shared by every tree.
        if !cache || !self.is_valid() {
            return self.construct(runtime).map(Arc::new);
        }
        let cell = self.projection_cell();
        if let Some(cached) = cell.get() {
            return match downcast::<R>(cached) {
                Some(value) => {
                    trace!("projection cache hit");
                    Ok(value)
                }
                None => {
                    debug!(
                        runtime = type_name::<R>(),
                        "cached projection belongs to another runtime; projecting uncached"
                    );
                    self.construct(runtime).map(Arc::new)
                }
            };
        }

        let value = Arc::new(self.construct(runtime)?);
        let erased: CachedProjection = Arc::clone(&value) as CachedProjection;
        match cell.set(erased) {
            Ok(()) => Ok(value),
            // Another reader filled the cell first; hand out its value.
            Err(_) => Ok(cell.get().and_then(downcast::<R>).unwrap_or(value)),
        }
    }

    fn construct<R: ScriptRuntime>(&self, runtime: &mut R) -> ParamResult<R::Value> {
        if self.children_map().is_empty() {
            return Ok(if self.text().is_empty() {
                runtime.undefined()
            } else {
                runtime.string(self.text())
            });
        }
        let mut entries = Vec::with_capacity(self.len() + 1);
        for (name, child) in self.children() {
            entries.push((name, child.construct(runtime)?));
        }
        if !self.text().is_empty() {
            entries.push((TEXT_SLOT, runtime.string(self.text())));
        }
        runtime.object(entries)
    }
}

fn downcast<R: ScriptRuntime>(cached: &CachedProjection) -> Option<Arc<R::Value>> {
    Arc::clone(cached).downcast::<R::Value>().ok()
}
