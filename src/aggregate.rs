//! Entity aggregate: identity, derived state, and version tracking.
//!
//! An [`Aggregate`] is born either via creation (a `"create"` event is
//! synthesized and committed as sequence 1) or via reconstruction (the
//! full stream is scanned and folded in order). Mutations produce new
//! event records; the staleness guard decides whether committing one is
//! safe.
//!
//! ## Version counters
//!
//! - `applied_version`: events folded into local state so far, including
//!   events applied locally but not yet committed.
//! - `committed_version`: events known durable, as last observed by this
//!   instance.
//!
//! `applied_version >= committed_version` always. Equality means the
//! instance is fully synchronized with storage; inequality means it
//! holds locally-applied, uncommitted mutations and must reconcile
//! before committing anything further.

use crate::error::{Error, Result};
use crate::event::EventRecord;
use crate::log::EventLog;
use crate::reducer::{EntityState, CREATE_ACTION};
use crate::types::{EntityKey, Sequence};

/// A live entity reconstructed from (and extended through) its event
/// stream.
///
/// One instance is meant for single-threaded use; concurrent writers
/// hold independent instances and the store-level conditional append
/// arbitrates between them.
pub struct Aggregate<S: EntityState> {
    key: EntityKey,
    state: S,
    applied_version: Sequence,
    committed_version: Sequence,
    log: EventLog,
}

impl<S: EntityState> Aggregate<S> {
    /// Create a new entity, committing its `"create"` event as sequence 1.
    ///
    /// The initial payload is handed to the reducer like any other event
    /// payload. Returns [`Error::DuplicateKey`] if an event stream
    /// already exists for `key` — including when a concurrent creator
    /// wins the race for sequence 1.
    pub fn create(log: EventLog, key: EntityKey, initial_payload: serde_json::Value) -> Result<Self> {
        if log.latest_sequence(&key)? > 0 {
            return Err(Error::DuplicateKey(key.to_string()));
        }

        let record = EventRecord::new(key.clone(), 1, CREATE_ACTION, initial_payload);
        let mut state = S::default();
        state.apply(&record)?;

        log.append_record(&record, 0).map_err(|e| {
            if e.is_conflict() {
                Error::DuplicateKey(key.to_string())
            } else {
                e
            }
        })?;

        tracing::debug!(key = %key, "created entity");
        Ok(Self {
            key,
            state,
            applied_version: 1,
            committed_version: 1,
            log,
        })
    }

    /// Reconstruct an entity by folding its full stream in order.
    ///
    /// Returns [`Error::NotFound`] if no events exist for `key`. Both
    /// version counters end at the final sequence.
    pub fn load(log: EventLog, key: EntityKey) -> Result<Self> {
        let records = log.scan(&key)?;
        if records.is_empty() {
            return Err(Error::NotFound(key.to_string()));
        }

        let mut state = S::default();
        for record in &records {
            state.apply(record)?;
        }
        // scan() verified contiguity, so the last sequence is the count
        let version = records[records.len() - 1].sequence;

        tracing::debug!(key = %key, version, "reconstructed entity");
        Ok(Self {
            key,
            state,
            applied_version: version,
            committed_version: version,
            log,
        })
    }

    /// Apply a mutation and durably commit it as the next event.
    ///
    /// Fails with [`Error::Stale`] in two situations sharing one signal:
    ///
    /// - this instance holds locally-applied uncommitted events
    ///   (`applied_version != committed_version`) — committing now would
    ///   discard them or write events out of order;
    /// - another writer won the race for the next sequence slot.
    ///
    /// Either way local state and both counters are left exactly as they
    /// were; the caller reconciles (typically by reloading) and decides
    /// whether to retry. The event is validated through the reducer
    /// before anything durable happens, so a rejected action writes
    /// nothing.
    pub fn mutate(&mut self, action: &str, payload: serde_json::Value) -> Result<EventRecord> {
        if self.applied_version != self.committed_version {
            return Err(Error::Stale(format!(
                "{}: {} locally applied event(s) not yet committed; reload before committing",
                self.key,
                self.applied_version - self.committed_version
            )));
        }

        let record = EventRecord::new(
            self.key.clone(),
            self.committed_version + 1,
            action,
            payload,
        );

        // Fold into a copy first: the exact bytes we validate are the
        // bytes stored, and a failure at any point leaves `self` intact.
        let mut next = self.state.clone();
        next.apply(&record)?;

        self.log
            .append_record(&record, self.committed_version)
            .map_err(|e| {
                if e.is_conflict() {
                    Error::Stale(format!(
                        "{}: another writer advanced the stream past sequence {}",
                        self.key, self.committed_version
                    ))
                } else {
                    e
                }
            })?;

        self.state = next;
        self.applied_version = record.sequence;
        self.committed_version = record.sequence;
        Ok(record)
    }

    /// Apply a mutation locally without a durability round-trip.
    ///
    /// The record gets a provisional sequence of `applied_version + 1`
    /// and is folded immediately; only `applied_version` advances. Until
    /// the instance reconciles, any subsequent [`mutate`] fails with
    /// [`Error::Stale`].
    ///
    /// [`mutate`]: Aggregate::mutate
    pub fn mutate_local(&mut self, action: &str, payload: serde_json::Value) -> Result<EventRecord> {
        let record = EventRecord::new(
            self.key.clone(),
            self.applied_version + 1,
            action,
            payload,
        );

        let mut next = self.state.clone();
        next.apply(&record)?;

        self.state = next;
        self.applied_version = record.sequence;
        Ok(record)
    }

    /// Whether this instance's committed view still matches the store.
    ///
    /// Returns `false` if another writer has committed events behind this
    /// instance's back. Read-only diagnostic; never raises staleness
    /// itself.
    pub fn is_current(&self) -> Result<bool> {
        Ok(self.committed_version == self.log.latest_sequence(&self.key)?)
    }

    /// The entity's key.
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// The current derived state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Count of events folded into local state, committed or not.
    pub fn applied_version(&self) -> Sequence {
        self.applied_version
    }

    /// Count of events known durably persisted, as last observed here.
    pub fn committed_version(&self) -> Sequence {
        self.committed_version
    }

    /// Lowercased unqualified name of the state type.
    ///
    /// Stores that partition streams by entity type can use this as the
    /// partition label.
    pub fn kind() -> String {
        let name = std::any::type_name::<S>();
        name.rsplit("::").next().unwrap_or(name).to_ascii_lowercase()
    }
}

impl<S: EntityState + std::fmt::Debug> std::fmt::Debug for Aggregate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregate")
            .field("key", &self.key)
            .field("state", &self.state)
            .field("applied_version", &self.applied_version)
            .field("committed_version", &self.committed_version)
            .finish()
    }
}
