//! Test helpers shared across the param-node crates.
//!
//! - [`figment`]: run configuration tests inside a `figment::Jail`.
//! - [`layers`]: temporary directories populated with layer documents.
//! - [`xml`]: whitespace normalisation for comparing rendered markup.

pub mod figment;
pub mod layers;
pub mod xml;
