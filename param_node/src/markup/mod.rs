//! Markup reader seam used by the merge engine.
//!
//! The merge engine only needs to see an element's name, attributes, child
//! elements and text. [`MarkupElement`] captures that surface so any parser
//! can drive a merge; [`Element`] is the owned tree produced by the bundled
//! `quick-xml` backend.

mod element;

pub use element::Element;

/// Read-only view of one markup element.
pub trait MarkupElement {
    /// Element (tag) name.
    fn name(&self) -> &str;

    /// Attributes as `(name, value)` pairs. Names are unique.
    fn attributes(&self) -> impl Iterator<Item = (&str, &str)>;

    /// Child elements in document order.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Direct text content, with surrounding whitespace trimmed.
    fn text(&self) -> &str;

    /// Looks up a single attribute by name.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .find_map(|(key, value)| (key == name).then_some(value))
    }
}

#[cfg(test)]
mod tests;
