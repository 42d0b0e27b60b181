//! Event record type for the append-only entity streams.

use crate::types::{EntityKey, Sequence};
use serde::{Deserialize, Serialize};

/// An immutable record of one state transition for one entity.
///
/// Each record carries:
/// - The owning aggregate's key
/// - A 1-based, gap-free sequence number unique within that key's stream
/// - A symbolic action name identifying the transition kind
/// - An opaque payload interpreted only by the entity's reducer
/// - A creation timestamp (informational; sequence is authoritative for
///   ordering)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Owning aggregate's identifier
    pub entity_key: EntityKey,
    /// Position in the entity's stream (1-based, gap-free, never reused)
    pub sequence: Sequence,
    /// Transition kind (e.g. "create", "increment")
    pub action: String,
    /// Opaque payload, decoded by the reducer per action
    pub payload: serde_json::Value,
    /// Milliseconds since epoch at record creation
    pub timestamp: i64,
}

impl EventRecord {
    /// Build a record stamped with the current time.
    ///
    /// Sequence numbers are normally assigned by the event log or
    /// aggregate; constructing records directly is mainly useful for
    /// reducer unit tests.
    pub fn new(
        entity_key: EntityKey,
        sequence: Sequence,
        action: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            entity_key,
            sequence,
            action: action.into(),
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
