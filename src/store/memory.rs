//! In-memory reference store.
//!
//! A truly ephemeral [`EventStore`]: no files, no recovery, all data lost
//! on drop. Use it for unit tests that need maximum isolation and speed,
//! or for embedders that want event sourcing semantics without
//! durability.

use crate::error::{Error, Result};
use crate::event::EventRecord;
use crate::store::EventStore;
use crate::types::{EntityKey, Sequence};
use parking_lot::Mutex;
use std::collections::{btree_map::Entry, BTreeMap};

/// Ephemeral event store backed by an ordered in-memory map.
///
/// Inserts are conditional under a single lock, so the uniqueness of
/// `(entity_key, sequence)` holds under any thread interleaving. Always
/// autocommit: every insert is atomic on its own.
#[derive(Debug, Default)]
pub struct MemoryStore {
    streams: Mutex<BTreeMap<EntityKey, BTreeMap<Sequence, EventRecord>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all streams.
    pub fn len(&self) -> usize {
        self.streams.lock().values().map(|s| s.len()).sum()
    }

    /// Whether the store holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for MemoryStore {
    fn insert_if_absent(&self, record: &EventRecord) -> Result<()> {
        let mut streams = self.streams.lock();
        let stream = streams.entry(record.entity_key.clone()).or_default();
        match stream.entry(record.sequence) {
            Entry::Occupied(_) => Err(Error::Conflict(format!(
                "sequence {} already taken for {}",
                record.sequence, record.entity_key
            ))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    fn scan(&self, key: &EntityKey) -> Result<Vec<EventRecord>> {
        let streams = self.streams.lock();
        Ok(streams
            .get(key)
            .map(|stream| stream.values().cloned().collect())
            .unwrap_or_default())
    }

    fn latest_sequence(&self, key: &EntityKey) -> Result<Sequence> {
        let streams = self.streams.lock();
        Ok(streams
            .get(key)
            .and_then(|stream| stream.keys().next_back().copied())
            .unwrap_or(0))
    }
}
