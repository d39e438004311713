use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::error::MapError;
use crate::key::{Key, KeyId};

/// What a [`set_with`](TokenMap::set_with) call does when the key already
/// holds a value.
///
/// The three cases don't reduce to a boolean, so the choice travels as an
/// explicit variant rather than a flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// Replace the stored value unconditionally. The default, and the
    /// behavior of plain [`set`](TokenMap::set).
    #[default]
    Overwrite,
    /// Keep the existing value; the call becomes a silent no-op.
    Ignore,
    /// Refuse with [`MapError::Conflict`], leaving the existing value in
    /// place.
    Fail,
}

/// What a [`remove_with`](TokenMap::remove_with) call does when the key
/// holds no value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnMiss {
    /// Silent no-op. The default, and the behavior of plain
    /// [`remove`](TokenMap::remove).
    #[default]
    Ignore,
    /// Refuse with [`MapError::NotFound`].
    Fail,
}

/// A heterogeneous store keyed by [`Key`] identity.
///
/// One map holds values of any number of different types at once; each
/// entry's type is fixed by the `Key<T>` it was stored under, and what
/// comes back out is already a `&T`, with no casting at the API boundary.
/// The map never inspects the values it holds; it is a pure identity-keyed
/// store.
///
/// Operations come in pairs: a default-policy form ([`get`](Self::get),
/// [`set`](Self::set), [`remove`](Self::remove)) and a failing or
/// policy-taking form ([`try_get`](Self::try_get),
/// [`set_with`](Self::set_with), [`remove_with`](Self::remove_with)) for
/// call sites that want a miss or a conflict surfaced as an error instead
/// of a silent outcome.
///
/// The map does no locking of its own: it is a plain synchronous value.
/// Stored values must be `Send + Sync`, which keeps the map `Send + Sync`
/// as a whole, so an embedding system that shares one across threads can
/// wrap it in its own lock.
///
/// # Examples
///
/// ```
/// use sovran_tokenmap::{Key, TokenMap};
///
/// let name: Key<String> = Key::new("NAME");
/// let age: Key<u32> = Key::new("AGE");
///
/// let mut map = TokenMap::new();
/// map.set(&name, "Rock".to_string()).set(&age, 42);
///
/// assert_eq!(map.get(&name).map(String::as_str), Some("Rock"));
/// assert_eq!(map.get(&age), Some(&42));
/// assert!(map.has(&name));
///
/// map.remove(&name);
/// assert!(!map.has(&name));
/// assert_eq!(map.get(&age), Some(&42));
/// ```
#[derive(Debug)]
pub struct TokenMap {
    entries: HashMap<KeyId, Box<dyn Any + Send + Sync>>,
}

impl TokenMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns whether a value is currently associated with `key`.
    ///
    /// No side effects, never fails, and needs nothing from `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, TokenMap};
    ///
    /// let flag: Key<bool> = Key::new("flag");
    /// let mut map = TokenMap::new();
    ///
    /// assert!(!map.has(&flag));
    /// map.set(&flag, true);
    /// assert!(map.has(&flag));
    /// ```
    pub fn has<T>(&self, key: &Key<T>) -> bool {
        self.entries.contains_key(&key.id())
    }

    /// Returns the value associated with `key`, or `None` on a miss.
    ///
    /// The borrow comes back untouched — no copy, no transformation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, TokenMap};
    ///
    /// let greeting: Key<String> = Key::new("greeting");
    /// let mut map = TokenMap::new();
    ///
    /// assert_eq!(map.get(&greeting), None);
    ///
    /// map.set(&greeting, "hello".to_string());
    /// assert_eq!(map.get(&greeting), Some(&"hello".to_string()));
    /// ```
    pub fn get<T: Any + Send + Sync>(&self, key: &Key<T>) -> Option<&T> {
        self.entries
            .get(&key.id())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the value associated with `key`, treating a miss as an
    /// error.
    ///
    /// Use this at call sites that have already established the key is
    /// present (or accept the risk): the success type is a plain `&T`
    /// with no absence case.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key has no entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, MapError, TokenMap};
    ///
    /// let counter: Key<u64> = Key::new("counter");
    /// let mut map = TokenMap::new();
    ///
    /// assert!(matches!(map.try_get(&counter), Err(MapError::NotFound(_))));
    ///
    /// map.set(&counter, 7u64);
    /// assert_eq!(*map.try_get(&counter)?, 7);
    /// # Ok::<(), MapError>(())
    /// ```
    pub fn try_get<T: Any + Send + Sync>(&self, key: &Key<T>) -> Result<&T, MapError> {
        self.get(key)
            .ok_or_else(|| MapError::NotFound(key.to_string()))
    }

    /// Returns a mutable borrow of the value associated with `key`, or
    /// `None` on a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, TokenMap};
    ///
    /// let visits: Key<u32> = Key::new("visits");
    /// let mut map = TokenMap::new();
    /// map.set(&visits, 0u32);
    ///
    /// if let Some(count) = map.get_mut(&visits) {
    ///     *count += 1;
    /// }
    /// assert_eq!(map.get(&visits), Some(&1));
    /// ```
    pub fn get_mut<T: Any + Send + Sync>(&mut self, key: &Key<T>) -> Option<&mut T> {
        self.entries
            .get_mut(&key.id())
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// Returns `&mut self` so calls chain. This is
    /// [`set_with`](Self::set_with) under [`OnConflict::Overwrite`],
    /// minus the `Debug` bound that policy form needs for its conflict
    /// diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, TokenMap};
    ///
    /// let name: Key<&str> = Key::new("NAME");
    /// let age: Key<u32> = Key::new("AGE");
    /// let mut map = TokenMap::new();
    ///
    /// map.set(&name, "Rock").set(&age, 42);
    ///
    /// // Overwrite is the default conflict behavior.
    /// map.set(&age, 43);
    /// assert_eq!(map.get(&age), Some(&43));
    /// ```
    pub fn set<T: Any + Send + Sync>(&mut self, key: &Key<T>, value: T) -> &mut Self {
        self.entries.insert(key.id(), Box::new(value));
        self
    }

    /// Associates `value` with `key` under an explicit conflict policy.
    ///
    /// An absent key stores the value no matter which policy is given;
    /// the policy only decides what happens when the key is already
    /// occupied. The `Debug` bound exists solely to render the two values
    /// in the [`MapError::Conflict`] diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Conflict`] under [`OnConflict::Fail`] when the
    /// key already holds a value; the existing value stays in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, MapError, OnConflict, TokenMap};
    ///
    /// let slot: Key<&str> = Key::new("slot");
    /// let mut map = TokenMap::new();
    ///
    /// // An absent key stores regardless of policy.
    /// map.set_with(&slot, "first", OnConflict::Fail)?;
    ///
    /// // Ignore keeps what's there...
    /// map.set_with(&slot, "second", OnConflict::Ignore)?;
    /// assert_eq!(map.get(&slot), Some(&"first"));
    ///
    /// // ...Overwrite replaces it...
    /// map.set_with(&slot, "third", OnConflict::Overwrite)?;
    /// assert_eq!(map.get(&slot), Some(&"third"));
    ///
    /// // ...and Fail refuses, leaving the entry alone.
    /// assert!(map.set_with(&slot, "fourth", OnConflict::Fail).is_err());
    /// assert_eq!(map.get(&slot), Some(&"third"));
    /// # Ok::<(), MapError>(())
    /// ```
    pub fn set_with<T>(
        &mut self,
        key: &Key<T>,
        value: T,
        on_conflict: OnConflict,
    ) -> Result<&mut Self, MapError>
    where
        T: Any + Send + Sync + fmt::Debug,
    {
        if let Some(existing) = self.entries.get(&key.id()) {
            match on_conflict {
                OnConflict::Overwrite => {}
                OnConflict::Ignore => return Ok(self),
                OnConflict::Fail => {
                    // A key's identity is only ever paired with values of
                    // its own T, so this downcast holds for any map driven
                    // through the safe API.
                    let existing = existing
                        .downcast_ref::<T>()
                        .map(|v| format!("{:?}", v))
                        .unwrap_or_else(|| String::from("<value of another type>"));
                    return Err(MapError::Conflict {
                        key: key.to_string(),
                        value: format!("{:?}", value),
                        existing,
                    });
                }
            }
        }
        self.entries.insert(key.id(), Box::new(value));
        Ok(self)
    }

    /// Removes the entry for `key`, reporting whether one was there.
    ///
    /// Removing an absent key is a silent no-op; no other key's entry is
    /// touched either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, TokenMap};
    ///
    /// let token: Key<i32> = Key::new("token");
    /// let mut map = TokenMap::new();
    ///
    /// map.set(&token, 1);
    /// assert!(map.remove(&token));
    /// assert!(!map.remove(&token)); // already gone; silent by default
    /// ```
    pub fn remove<T>(&mut self, key: &Key<T>) -> bool {
        self.entries.remove(&key.id()).is_some()
    }

    /// Removes the entry for `key` under an explicit miss policy.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] under [`OnMiss::Fail`] when the key
    /// has no entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sovran_tokenmap::{Key, MapError, OnMiss, TokenMap};
    ///
    /// let token: Key<i32> = Key::new("token");
    /// let mut map = TokenMap::new();
    ///
    /// map.remove_with(&token, OnMiss::Ignore)?; // no-op
    /// assert!(matches!(
    ///     map.remove_with(&token, OnMiss::Fail),
    ///     Err(MapError::NotFound(_))
    /// ));
    /// # Ok::<(), MapError>(())
    /// ```
    pub fn remove_with<T>(&mut self, key: &Key<T>, on_miss: OnMiss) -> Result<(), MapError> {
        if self.entries.remove(&key.id()).is_none() {
            match on_miss {
                OnMiss::Ignore => {}
                OnMiss::Fail => return Err(MapError::NotFound(key.to_string())),
            }
        }
        Ok(())
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TokenMap {
    fn default() -> Self {
        Self::new()
    }
}
