//! Main entry point: the store handle embedders pass around.
//!
//! There is deliberately no process-global store binding. A [`Ledger`]
//! is an explicit handle constructed once and handed to whatever needs
//! to create or load aggregates; independent ledgers over the same
//! backend are safe because all arbitration happens in the store.

use crate::aggregate::Aggregate;
use crate::error::Result;
use crate::log::EventLog;
use crate::reducer::EntityState;
use crate::store::memory::MemoryStore;
use crate::store::EventStore;
use crate::types::EntityKey;
use std::sync::Arc;

/// Handle to one event-sourced entity store.
///
/// # Example
///
/// ```
/// use sequentdb::{Ledger, EntityState, EventRecord, Error, Result, CREATE_ACTION};
/// use serde_json::json;
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// impl EntityState for Counter {
///     fn apply(&mut self, event: &EventRecord) -> Result<()> {
///         match event.action.as_str() {
///             CREATE_ACTION => self.count = 0,
///             "increment" => {
///                 self.count += event.payload.as_i64().ok_or_else(|| {
///                     Error::Serialization("expected integer payload".into())
///                 })?;
///             }
///             other => return Err(Error::UnknownAction(other.to_string())),
///         }
///         Ok(())
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let ledger = Ledger::ephemeral();
///
/// let mut counter = ledger.create::<Counter>("tally", json!({}))?;
/// counter.mutate("increment", json!(5))?;
///
/// let reloaded = ledger.load::<Counter>("tally")?;
/// assert_eq!(reloaded.state().count, 5);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Ledger {
    log: EventLog,
}

impl Ledger {
    /// Ledger backed by an ephemeral in-memory store.
    ///
    /// No files, no recovery; all data is lost on drop. Use for tests and
    /// temporary computations.
    pub fn ephemeral() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Ledger over a caller-provided storage backend.
    pub fn with_store(store: Arc<dyn EventStore>) -> Self {
        Self {
            log: EventLog::new(store),
        }
    }

    /// Create a builder for ledger configuration.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Create a new entity of type `S` under `key`.
    ///
    /// Synthesizes and commits the `"create"` event; see
    /// [`Aggregate::create`].
    pub fn create<S: EntityState>(
        &self,
        key: impl Into<EntityKey>,
        initial_payload: serde_json::Value,
    ) -> Result<Aggregate<S>> {
        Aggregate::create(self.log.clone(), key.into(), initial_payload)
    }

    /// Reconstruct an existing entity of type `S`; see [`Aggregate::load`].
    pub fn load<S: EntityState>(&self, key: impl Into<EntityKey>) -> Result<Aggregate<S>> {
        Aggregate::load(self.log.clone(), key.into())
    }

    /// The underlying event log, for direct stream access.
    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

/// Builder for ledger configuration.
#[derive(Default)]
pub struct LedgerBuilder {
    store: Option<Arc<dyn EventStore>>,
}

impl LedgerBuilder {
    /// Use the given storage backend.
    pub fn store(mut self, store: Arc<dyn EventStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Open the ledger. Falls back to an ephemeral in-memory store when
    /// no backend was configured.
    pub fn open(self) -> Ledger {
        match self.store {
            Some(store) => Ledger::with_store(store),
            None => Ledger::ephemeral(),
        }
    }
}
