use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide allocator for key identities. Relaxed is enough here:
/// ids only need to be unique, nothing orders them.
static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(0);

/// The runtime identity of a [`Key`]. Ids are never reused, so a dropped
/// key can never alias an entry made under a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct KeyId(u64);

impl KeyId {
    fn next() -> Self {
        KeyId(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque, identity-unique handle tagged with the type of value it may
/// be paired with in a [`TokenMap`](crate::TokenMap).
///
/// A key is two things at once: at runtime it is nothing but a unique
/// identity plus a display name, and at compile time it carries a phantom
/// parameter `T` that pins down the value type the map will accept and
/// return for it. The map never inspects `T`; the compiler correlates the
/// two ends of every lookup through the key alone.
///
/// Equality is identity, not name. Every call to [`Key::new`] produces a
/// distinct key, even when the names collide; only a [`Clone`] of a key
/// addresses the same map entries as the original.
///
/// # Examples
///
/// ```
/// use sovran_tokenmap::Key;
///
/// let width: Key<u32> = Key::new("width");
/// let other: Key<u32> = Key::new("width");
///
/// // Same name, different keys.
/// assert_ne!(width, other);
///
/// // A clone is the same key.
/// assert_eq!(width, width.clone());
/// ```
///
/// Keys are usually declared once and shared. A `static` works well:
///
/// ```
/// use std::sync::LazyLock;
/// use sovran_tokenmap::Key;
///
/// static RETRIES: LazyLock<Key<u32>> = LazyLock::new(|| Key::new("RETRIES"));
///
/// assert_eq!(RETRIES.name(), "RETRIES");
/// ```
pub struct Key<T> {
    id: KeyId,
    name: Arc<str>,
    // fn() -> T keeps the key Send + Sync and free of any ownership claim
    // over T; the parameter exists only for the type checker.
    _type: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Creates a key with a fresh identity.
    ///
    /// The name is carried for diagnostics only — it shows up in
    /// [`Display`](fmt::Display) output and error messages, and plays no
    /// part in equality or lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::Key;
    ///
    /// let name: Key<String> = Key::new("NAME");
    /// let age = Key::<u32>::new("AGE");
    /// ```
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: KeyId::next(),
            name: name.into(),
            _type: PhantomData,
        }
    }

    /// The display name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn id(&self) -> KeyId {
        self.id
    }
}

// Manual impls: a key is Clone/Eq/Hash no matter what T is, and the
// derives would demand T bounds the phantom parameter doesn't need.

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: Arc::clone(&self.name),
            _type: PhantomData,
        }
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Key<T> {}

impl<T> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id.0)
            .field("name", &self.name)
            .finish()
    }
}

/// Renders as `Key(<name>)`; this is the form error messages use.
///
/// ```
/// use sovran_tokenmap::Key;
///
/// let key: Key<bool> = Key::new("rock and stone");
/// assert_eq!(key.to_string(), "Key(rock and stone)");
/// ```
impl<T> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_name_still_distinct() {
        let a: Key<i32> = Key::new("shared");
        let b: Key<i32> = Key::new("shared");
        assert_eq!(a.name(), b.name());
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_shares_identity() {
        let original: Key<String> = Key::new("config");
        let copy = original.clone();
        assert_eq!(original, copy);
        assert_eq!(copy.name(), "config");
    }

    #[test]
    fn test_display_format() {
        let key: Key<u8> = Key::new("rock and stone");
        assert_eq!(key.to_string(), "Key(rock and stone)");
        assert_eq!(format!("{}", key), "Key(rock and stone)");
    }

    #[test]
    fn test_debug_includes_name() {
        let key: Key<u8> = Key::new("levels");
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("levels"));
        assert!(rendered.contains("Key"));
    }

    #[test]
    fn test_hash_follows_identity() {
        let a: Key<i32> = Key::new("dup");
        let b: Key<i32> = Key::new("dup");

        let mut seen = HashSet::new();
        seen.insert(a.clone());

        assert!(seen.contains(&a));
        assert!(!seen.contains(&b));

        seen.insert(b.clone());
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_owned_name_works_too() {
        let key: Key<Vec<u8>> = Key::new(String::from("buffer"));
        assert_eq!(key.name(), "buffer");
    }
}
