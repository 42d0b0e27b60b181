//! Append-only event log.
//!
//! [`EventLog`] is a thin, cloneable facade over an [`EventStore`] handle.
//! It owns no state of its own: sequencing is enforced entirely by the
//! store's conditional insert, so any number of log handles (across
//! threads or processes) may race to extend the same stream and exactly
//! one writer wins each slot.

use crate::error::{Error, Result};
use crate::event::EventRecord;
use crate::store::EventStore;
use crate::types::{EntityKey, Sequence};
use std::sync::Arc;

/// Durable, totally ordered, per-key append-only storage with conflict
/// detection.
///
/// A sequence conflict is surfaced to the caller as [`Error::Conflict`]
/// and is never retried here: blind retry would let a writer silently
/// skip reconciling its divergent view of the stream.
#[derive(Clone)]
pub struct EventLog {
    store: Arc<dyn EventStore>,
}

impl EventLog {
    /// Create a log over an explicit store handle.
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Append one record at `expected_sequence + 1`.
    ///
    /// Builds the record, stamps it, and performs the conditional insert.
    /// Returns the appended record on success, [`Error::Conflict`] if a
    /// concurrent writer already took the slot.
    pub fn append(
        &self,
        key: &EntityKey,
        action: &str,
        payload: serde_json::Value,
        expected_sequence: Sequence,
    ) -> Result<EventRecord> {
        let record = EventRecord::new(key.clone(), expected_sequence + 1, action, payload);
        self.append_record(&record, expected_sequence)?;
        Ok(record)
    }

    /// Append a pre-built record, conditioned on `expected_sequence`.
    ///
    /// The record's sequence must be `expected_sequence + 1`. This is the
    /// path for callers that validate a record through a reducer before
    /// committing it, so the exact bytes folded locally are the bytes
    /// stored.
    pub fn append_record(&self, record: &EventRecord, expected_sequence: Sequence) -> Result<()> {
        debug_assert_eq!(record.sequence, expected_sequence + 1);

        let result = if self.store.autocommit() {
            self.store.insert_if_absent(record)
        } else {
            // No native conditional insert: close the read-then-write
            // window inside one serializable transaction.
            self.store.begin()?;
            match self.guarded_insert(record, expected_sequence) {
                Ok(()) => self.store.commit(),
                Err(e) => {
                    self.store.rollback()?;
                    Err(e)
                }
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!(
                    key = %record.entity_key,
                    sequence = record.sequence,
                    action = %record.action,
                    "appended event"
                );
                Ok(())
            }
            Err(e) => {
                if e.is_conflict() {
                    tracing::warn!(
                        key = %record.entity_key,
                        sequence = record.sequence,
                        "append lost sequence race"
                    );
                }
                Err(e)
            }
        }
    }

    /// Re-read the stream head, then insert only if it still matches.
    fn guarded_insert(&self, record: &EventRecord, expected_sequence: Sequence) -> Result<()> {
        let latest = self.store.latest_sequence(&record.entity_key)?;
        if latest != expected_sequence {
            return Err(Error::Conflict(format!(
                "{} advanced to sequence {} while writer expected {}",
                record.entity_key, latest, expected_sequence
            )));
        }
        self.store.insert_if_absent(record)
    }

    /// All records for a key in ascending sequence order.
    ///
    /// Used for reconstruction. Verifies the gap-free invariant on the way
    /// out: a stream whose sequences are not exactly `{1..N}` is corrupt
    /// and surfaces as [`Error::Storage`].
    pub fn scan(&self, key: &EntityKey) -> Result<Vec<EventRecord>> {
        let records = self.store.scan(key)?;
        for (i, record) in records.iter().enumerate() {
            let expected = i as Sequence + 1;
            if record.sequence != expected {
                return Err(Error::Storage(format!(
                    "corrupt stream {}: found sequence {} where {} was expected",
                    key, record.sequence, expected
                )));
            }
        }
        Ok(records)
    }

    /// Highest committed sequence for a key, or 0 if none exist.
    pub fn latest_sequence(&self, key: &EntityKey) -> Result<Sequence> {
        self.store.latest_sequence(key)
    }
}
