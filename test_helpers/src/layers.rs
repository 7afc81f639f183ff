//! Temporary template directories for loader and CLI tests.

use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory of layer documents, removed on drop.
///
/// # Examples
///
/// ```
/// use param_node_test_helpers::layers::LayerDir;
///
/// # fn main() -> anyhow::Result<()> {
/// let dir = LayerDir::new()?
///     .with_layer("base.xml", "<Unit><Hp>10</Hp></Unit>")?
///     .with_layer("units/elite.xml", r#"<Unit parent="base"/>"#)?;
/// assert!(dir.root().join("units/elite.xml").is_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LayerDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl LayerDir {
    /// Creates an empty directory.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created or its path is not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create layer directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("layer directory is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails when the file or its parents cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Builder-style variant of [`LayerDir::write`].
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`LayerDir::write`].
    pub fn with_layer(self, relative: &str, contents: &str) -> Result<Self> {
        self.write(relative, contents)?;
        Ok(self)
    }
}
