//! Document sources resolving logical paths to bytes.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::{ParamError, ParamResult};

/// Resolves logical document paths to their contents.
pub trait DocumentSource {
    /// Reads the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; [`io::ErrorKind::NotFound`] signals
    /// an absent document.
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;

    /// Human-readable description used in error reports.
    fn describe(&self) -> String;
}

/// Documents stored beneath a directory.
///
/// Access goes through a `cap-std` directory handle, so relative paths that
/// try to climb out of the root (`../secret.xml`) and absolute paths are
/// rejected.
#[derive(Debug)]
pub struct DirSource {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirSource {
    /// Opens `root` as a document source.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Source`] when the directory cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> ParamResult<Self> {
        let path = root.as_ref();
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| ParamError::read_failure(path, "filesystem".to_owned(), err))?;
        Ok(Self {
            root: path.to_owned(),
            dir,
        })
    }

    /// Directory the source was opened on.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl DocumentSource for DirSource {
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.dir.read(path)
    }

    fn describe(&self) -> String {
        format!("directory '{}'", self.root)
    }
}

/// Documents held in memory, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) {
        self.documents.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [`MemorySource::insert`].
    #[must_use]
    pub fn with_document(
        mut self,
        path: impl Into<Utf8PathBuf>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(path, contents);
        self
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.documents.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no document at '{path}'"))
        })
    }

    fn describe(&self) -> String {
        format!("memory source ({} documents)", self.documents.len())
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
