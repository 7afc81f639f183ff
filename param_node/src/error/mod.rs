//! Error types produced while loading and combining parameter trees.

mod constructors;
mod types;

pub use types::{ParamError, TreeSide};

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so a failure from one
/// layer can be cached and reported by several consumers without cloning the
/// underlying sources.
pub type ParamResult<T> = Result<T, std::sync::Arc<ParamError>>;

#[cfg(test)]
mod tests;
