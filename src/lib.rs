//! # SequentDB
//!
//! Embedded event-sourced entity store.
//!
//! Entities are never stored as mutable rows. Every state change is an
//! immutable, ordered [`EventRecord`]; current state is derived by
//! replaying an entity's events through a deterministic reducer
//! ([`EntityState`]). Per-entity sequencing is linearizable and gap-free
//! under concurrent writers: the storage backend's conditional insert on
//! `(entity_key, sequence)` is the single point of arbitration, and the
//! loser of a race sees a staleness error instead of a silent retry.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sequentdb::prelude::*;
//! use serde_json::json;
//!
//! let ledger = Ledger::ephemeral();
//!
//! // Create commits the "create" event as sequence 1
//! let mut counter = ledger.create::<Counter>("foobar", json!({}))?;
//!
//! // Committed mutations extend the stream one event at a time
//! counter.mutate("increment", json!(5))?;
//! counter.mutate("decrement", json!(4))?;
//!
//! // Reconstruction replays the stream and must agree exactly
//! let replayed = ledger.load::<Counter>("foobar")?;
//! assert_eq!(replayed.state(), counter.state());
//! ```
//!
//! ## Pieces
//!
//! - [`EventRecord`] - immutable fact describing one state transition
//! - [`EventLog`] - append-only, per-key-ordered storage facade with
//!   conflict detection
//! - [`EntityState`] - the reducer each entity type supplies
//! - [`Aggregate`] - live entity combining identity, derived state, and
//!   version tracking
//! - [`EventStore`] - the boundary a storage backend implements;
//!   [`MemoryStore`] is the ephemeral reference backend
//! - [`Ledger`] - the explicit handle embedders pass around

#![warn(missing_docs)]

mod aggregate;
mod error;
mod event;
mod ledger;
mod log;
mod reducer;
mod store;
mod types;

pub mod prelude;

// Re-export main entry points
pub use ledger::{Ledger, LedgerBuilder};

pub use aggregate::Aggregate;
pub use error::{Error, Result};
pub use event::EventRecord;
pub use log::EventLog;
pub use reducer::{EntityState, CREATE_ACTION};
pub use store::{memory::MemoryStore, EventStore};
pub use types::{EntityKey, Sequence};
