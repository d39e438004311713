use std::fmt;

/// Errors raised by the failing policy variants of
/// [`TokenMap`](crate::TokenMap).
///
/// Both kinds are deterministic outcomes of a caller-chosen policy: a miss
/// only fails when the caller asked for [`OnMiss::Fail`](crate::OnMiss) or
/// used [`try_get`](crate::TokenMap::try_get), and a conflict only fails
/// under [`OnConflict::Fail`](crate::OnConflict). A failed operation leaves
/// the map exactly as it was.
///
/// The payloads are pre-rendered strings for diagnostics; the error holds
/// no reference back into the map or the key.
#[derive(Debug)]
pub enum MapError {
    /// The key had no entry when the operation required one. Carries the
    /// key rendered as `Key(<name>)`.
    NotFound(String),
    /// A `set` found the key already occupied under
    /// [`OnConflict::Fail`](crate::OnConflict). Carries the rendered key,
    /// the rejected value, and the value that stayed in place.
    Conflict {
        /// The key, rendered as `Key(<name>)`.
        key: String,
        /// The value the rejected `set` carried, rendered with `Debug`.
        value: String,
        /// The value already stored, rendered with `Debug`.
        existing: String,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapError::NotFound(key) => {
                write!(f, "Looking up \"{}\" yielded no results.", key)
            }
            MapError::Conflict {
                key,
                value,
                existing,
            } => {
                write!(
                    f,
                    "Conflict while trying to set {} to {}; already set to {}.",
                    key, value, existing
                )
            }
        }
    }
}

impl std::error::Error for MapError {}
