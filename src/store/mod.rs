//! Storage collaborator boundary.
//!
//! The core never talks to a database directly; it consumes the
//! [`EventStore`] trait, which a backend implements over whatever engine
//! it likes (an embedded map, a relational table, a KV store). The only
//! hard requirement is a uniqueness-enforced conditional insert keyed by
//! `(entity_key, sequence)` — that insert is the single point of
//! arbitration between concurrent writers targeting the same stream.

pub mod memory;

use crate::error::Result;
use crate::event::EventRecord;
use crate::types::{EntityKey, Sequence};

/// Durable, per-key-ordered record storage consumed by the event log.
///
/// # Contract
///
/// - `(entity_key, sequence)` is unique. [`insert_if_absent`] must reject
///   the second of two concurrent inserts targeting the same slot with
///   [`Error::Conflict`]; whichever writer's insert lands first wins.
/// - [`scan`] returns records in ascending sequence order and retains no
///   iterator state between calls.
/// - Engine failures (connectivity, transaction, timeout) surface as
///   [`Error::Storage`] or [`Error::Io`], never as conflicts — masking a
///   timeout as an optimistic-lock failure would hide true conflicts.
/// - Stores lacking a native conditional insert run with
///   `autocommit() == false` and must make `begin`/`commit`/`rollback`
///   serializable; the event log then wraps its re-read-then-insert
///   sequence in one transaction to close the read-then-write window.
///
/// [`insert_if_absent`]: EventStore::insert_if_absent
/// [`scan`]: EventStore::scan
/// [`Error::Conflict`]: crate::Error::Conflict
/// [`Error::Storage`]: crate::Error::Storage
/// [`Error::Io`]: crate::Error::Io
pub trait EventStore: Send + Sync {
    /// Insert a record only if its `(entity_key, sequence)` slot is free.
    ///
    /// Returns [`Error::Conflict`] if the slot is already taken.
    ///
    /// [`Error::Conflict`]: crate::Error::Conflict
    fn insert_if_absent(&self, record: &EventRecord) -> Result<()>;

    /// All records for a key in ascending sequence order.
    fn scan(&self, key: &EntityKey) -> Result<Vec<EventRecord>>;

    /// Highest committed sequence for a key, or 0 if none exist.
    fn latest_sequence(&self, key: &EntityKey) -> Result<Sequence>;

    /// Whether a single insert is atomic on its own.
    ///
    /// Defaults to `true`. Stores that implement conditional insert via a
    /// read-then-write must return `false` and support transactions.
    fn autocommit(&self) -> bool {
        true
    }

    /// Begin an explicit transaction. No-op for autocommit stores.
    fn begin(&self) -> Result<()> {
        Ok(())
    }

    /// Commit the current transaction. No-op for autocommit stores.
    fn commit(&self) -> Result<()> {
        Ok(())
    }

    /// Roll back the current transaction. No-op for autocommit stores.
    fn rollback(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _assert_object_safe(_: &dyn EventStore) {}
    }
}
