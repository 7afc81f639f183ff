//! Layer merge engine.
//!
//! [`apply_layer`] merges one incoming element onto the child of a target node
//! that carries the element's name. Merging is structural: children of the
//! existing node that the incoming element does not mention survive
//! untouched. Reserved attributes on the incoming element change the rule for
//! that element only:
//!
//! | attribute            | effect                                              |
//! |----------------------|-----------------------------------------------------|
//! | `disable`            | delete the existing child; ignore the element       |
//! | `replace`            | drop the existing child's children before merging   |
//! | `datatype="tokens"`  | merge text as a whitespace-separated token list     |
//!
//! Every attribute other than `disable` and `replace` becomes an `@name` child
//! holding the literal value, so `datatype="tokens"` is kept as `@datatype`.

mod tokens;

use tracing::{trace, warn};

use crate::markup::MarkupElement;
use crate::node::{ATTRIBUTE_PREFIX, Node};

pub(crate) use tokens::merge_tokens;

/// Attribute deleting the corresponding existing element.
pub const DIRECTIVE_DISABLE: &str = "disable";
/// Attribute discarding the existing element's content before merging.
pub const DIRECTIVE_REPLACE: &str = "replace";
/// Attribute selecting a non-default value merge.
pub const DIRECTIVE_DATATYPE: &str = "datatype";
/// [`DIRECTIVE_DATATYPE`] value selecting token-list merging.
pub const TOKENS_DATATYPE: &str = "tokens";

#[derive(Clone, Copy, Debug, Default)]
struct Directives {
    disable: bool,
    replace: bool,
    tokens: bool,
}

impl Directives {
    fn read<E: MarkupElement>(element: &E) -> Self {
        let mut directives = Self::default();
        for (name, value) in element.attributes() {
            match name {
                DIRECTIVE_DISABLE => {
                    warn_if_valued(element.name(), name, value);
                    directives.disable = true;
                }
                DIRECTIVE_REPLACE => {
                    warn_if_valued(element.name(), name, value);
                    directives.replace = true;
                }
                DIRECTIVE_DATATYPE if value == TOKENS_DATATYPE => directives.tokens = true,
                _ => {}
            }
        }
        directives
    }
}

fn warn_if_valued(element: &str, directive: &str, value: &str) {
    if !value.is_empty() {
        warn!(
            element,
            directive,
            value,
            "merge directive carries a value; the value is ignored"
        );
    }
}

/// Returns `true` for attributes consumed by the merge engine.
fn is_directive(name: &str) -> bool {
    matches!(name, DIRECTIVE_DISABLE | DIRECTIVE_REPLACE)
}

/// Merges `element` into `target` as the child named after the element.
///
/// This is the entry point for callers that bring their own markup parser;
/// the `load_*` functions parse with the bundled backend and then call it on
/// the document's root element.
///
/// The projection caches of `target` and of every node whose value or child
/// set changes are cleared. Nodes are only ever reached through their parent,
/// so every ancestor on a merged path is cleared as well.
pub fn apply_layer<E: MarkupElement>(target: &mut Node, element: &E) {
    target.reset_projection();
    let name = element.name();
    let directives = Directives::read(element);

    if directives.disable {
        if target.remove_child(name).is_some() {
            trace!(element = name, "disabled inherited element");
        }
        return;
    }
    let child = target.child_mut(name);
    if directives.replace && child.clear_children() {
        trace!(element = name, "replacing inherited children");
    }
    if directives.tokens {
        let existing = if directives.replace { "" } else { child.text() };
        let merged = merge_tokens(existing, element.text());
        child.set_value(merged);
    } else if !element.text().is_empty() {
        child.set_value(element.text().to_owned());
    }

    for grandchild in element.children() {
        apply_layer(child, grandchild);
    }

    for (attribute, value) in element.attributes() {
        if is_directive(attribute) {
            continue;
        }
        child.reset_projection();
        child
            .child_mut(&format!("{ATTRIBUTE_PREFIX}{attribute}"))
            .set_value(value.to_owned());
    }
}
