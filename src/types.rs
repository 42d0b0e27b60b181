//! Core identifier types for the entity store.
//!
//! This module defines the fundamental types used throughout the system:
//! - [`EntityKey`]: Unique identifier for an aggregate's event stream
//! - [`Sequence`]: Per-entity monotonic event position

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of an event within one entity's stream.
///
/// Sequences are 1-based and gap-free per key: the persisted sequences for
/// any key are always exactly `{1..N}`. The value `0` means "no events yet"
/// and is the expected sequence passed for a stream's first append.
pub type Sequence = u64;

/// Opaque identifier naming one aggregate's event stream.
///
/// Assigned at creation and immutable thereafter. Keys order
/// lexicographically so stores can use them directly as ordered map keys.
///
/// # Examples
///
/// ```
/// use sequentdb::EntityKey;
///
/// let key = EntityKey::new("foobar");
/// assert_eq!(key.as_str(), "foobar");
///
/// let generated = EntityKey::generate();
/// assert_ne!(generated, EntityKey::generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Create a key from a caller-chosen identifier.
    pub fn new(key: impl Into<String>) -> Self {
        EntityKey(key.into())
    }

    /// Create a fresh unique key (UUID v4).
    ///
    /// Use when the caller has no natural identifier for the entity.
    pub fn generate() -> Self {
        EntityKey(Uuid::new_v4().to_string())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        EntityKey::new(key)
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        EntityKey(key)
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_str() {
        let key = EntityKey::new("foobar");
        assert_eq!(key.as_str(), "foobar");
        assert_eq!(key, EntityKey::from("foobar"));
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = EntityKey::generate();
        let b = EntityKey::generate();
        assert_ne!(a, b, "each generated key should be unique");
    }

    #[test]
    fn test_key_display() {
        let key = EntityKey::new("order-42");
        assert_eq!(format!("{}", key), "order-42");
    }

    #[test]
    fn test_key_ordering() {
        let a = EntityKey::new("aaa");
        let b = EntityKey::new("bbb");
        assert!(a < b, "keys should order lexicographically");
    }

    #[test]
    fn test_key_serde_transparent() {
        let key = EntityKey::new("foobar");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"foobar\"", "key should serialize as a bare string");
        let back: EntityKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
