//! Layered, immutable parameter trees.
//!
//! A [`Node`] holds a text value and a set of uniquely named children. Trees
//! are built by merging one or more XML documents ("layers") on top of each
//! other, so a base template can be refined by successive overrides. Incoming
//! elements may carry merge directives:
//!
//! - `disable=""` removes the existing element entirely;
//! - `replace=""` discards the existing element's children before merging;
//! - `datatype="tokens"` merges whitespace-separated token lists, where a
//!   `-token` entry removes a token.
//!
//! Attributes become children whose names are prefixed with `@`.
//!
//! # Example
//!
//! ```rust
//! use param_node::{Node, load_str};
//!
//! # fn main() -> param_node::ParamResult<()> {
//! let mut tree = Node::new();
//! load_str(&mut tree, r#"<Entity><Speed>4.5</Speed><Classes>a b c</Classes></Entity>"#, "base")?;
//! load_str(
//!     &mut tree,
//!     r#"<Entity><Classes datatype="tokens">-b d</Classes></Entity>"#,
//!     "override",
//! )?;
//!
//! let entity = tree.get_child("Entity");
//! assert_eq!(entity.get_child("Classes").text(), "a c d");
//! assert_eq!(entity.get_child("Speed").to_fixed().to_string(), "4.5");
//! assert!(!entity.get_child("Missing").is_valid());
//! # Ok(())
//! # }
//! ```

mod error;
mod filter;
mod intern;
mod loader;
pub mod markup;
mod merge;
mod node;
pub mod projection;
mod serialize;

pub use error::{ParamError, ParamResult, TreeSide};
pub use intern::Interned;
pub use loader::{
    DirSource, DocumentSource, MemorySource, PARENT_ATTRIBUTE, TemplateLoader, load_all,
    load_bytes, load_path, load_str,
};
pub use merge::{
    DIRECTIVE_DATATYPE, DIRECTIVE_DISABLE, DIRECTIVE_REPLACE, TOKENS_DATATYPE, apply_layer,
};
pub use node::{ATTRIBUTE_PREFIX, Fixed, Node, TEXT_SLOT};
pub use projection::{JsonRuntime, ScriptRuntime};
pub use serialize::{escape_bytes, escape_text};
