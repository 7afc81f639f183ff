//! Filtered copies between trees.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error};

use crate::{Node, ParamError, ParamResult, TreeSide};

impl Node {
    /// Copies the permitted grandchildren of `source`'s `name` child into
    /// this node's `name` child.
    ///
    /// Entries already present under this node's child are overwritten when a
    /// permitted entry of the same name is copied; everything else is kept.
    /// Used to expose a filtered view of an inherited template.
    ///
    /// Only this node's projection cache is cleared. The cache of the `name`
    /// child is left as it was, so do not rely on a cached projection of that
    /// child after a filtered copy.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::MissingChild`] when either node lacks a child
    /// called `name`. Both nodes are left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeSet;
    /// use param_node::{Node, load_str};
    ///
    /// # fn main() -> param_node::ParamResult<()> {
    /// let mut full = Node::new();
    /// load_str(&mut full, "<Entity><Cost>5</Cost><Health>100</Health><Secret>1</Secret></Entity>", "full")?;
    /// let mut preview = Node::new();
    /// load_str(&mut preview, "<Entity/>", "preview")?;
    ///
    /// let permitted = BTreeSet::from(["Cost", "Health"]);
    /// preview.copy_filtered_children_of_child(&full, "Entity", &permitted)?;
    /// assert_eq!(preview.get_path("Entity/Health").to_int(), 100);
    /// assert!(!preview.get_path("Entity/Secret").is_valid());
    /// # Ok(())
    /// # }
    /// ```
    pub fn copy_filtered_children_of_child<P>(
        &mut self,
        source: &Self,
        name: &str,
        permitted: &BTreeSet<P>,
    ) -> ParamResult<()>
    where
        P: Borrow<str> + Ord,
    {
        let Some(from) = source.children_map().get(name) else {
            return Err(missing_child(name, TreeSide::Source));
        };
        let Some(into) = self.existing_child_mut(name) else {
            return Err(missing_child(name, TreeSide::Target));
        };
        let mut copied = 0_usize;
        for (key, child) in from.children().filter(|(key, _)| permitted.contains(*key)) {
            into.insert_child(key, child.clone());
            copied += 1;
        }
        self.reset_projection();
        debug!(child = name, copied, "copied filtered children");
        Ok(())
    }
}

fn missing_child(name: &str, side: TreeSide) -> Arc<ParamError> {
    error!(child = name, %side, "filtered copy precondition violated");
    Arc::new(ParamError::MissingChild {
        name: name.to_owned(),
        side,
    })
}

#[cfg(test)]
mod tests;
