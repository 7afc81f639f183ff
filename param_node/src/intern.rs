//! Process-wide string interning for short, frequently repeated values.
//!
//! Interned strings are leaked and live for the rest of the program, so the
//! table must only ever see a bounded vocabulary (class names, identifiers and
//! the like). Never intern free-form or unique text.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use parking_lot::Mutex;

static TABLE: LazyLock<Mutex<HashSet<&'static str>>> = LazyLock::new(Mutex::default);

/// Deduplicated handle to an interned UTF-8 string.
///
/// Two handles created from equal text share the same storage, so equality is
/// a pointer comparison.
///
/// # Examples
///
/// ```rust
/// use param_node::Interned;
///
/// let a = Interned::new("Infantry");
/// let b = Interned::new(String::from("Infantry"));
/// assert_eq!(a, b);
/// assert!(std::ptr::eq(a.as_str(), b.as_str()));
/// ```
#[derive(Clone, Copy)]
pub struct Interned(&'static str);

impl Interned {
    /// Interns `value`, reusing the existing entry when one exists.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        let text = value.as_ref();
        let mut table = TABLE.lock();
        if let Some(&existing) = table.get(text) {
            return Self(existing);
        }
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        table.insert(leaked);
        Self(leaked)
    }

    /// Returns the interned text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl PartialEq for Interned {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Interned {}

impl std::hash::Hash for Interned {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ptr().hash(state);
    }
}

impl Deref for Interned {
    type Target = str;

    fn deref(&self) -> &str {
        self.0
    }
}

impl AsRef<str> for Interned {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Debug for Interned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Interned").field(&self.0).finish()
    }
}

impl fmt::Display for Interned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Interned;

    #[test]
    fn equal_text_shares_storage() {
        let first = Interned::new("Cavalry");
        let second = Interned::new("Cavalry".to_owned());
        assert_eq!(first, second);
        assert!(std::ptr::eq(first.as_str(), second.as_str()));
    }

    #[test]
    fn distinct_text_yields_distinct_handles() {
        assert_ne!(Interned::new("Ranged"), Interned::new("Melee"));
        assert_eq!(&*Interned::new("Ranged"), "Ranged");
    }
}
