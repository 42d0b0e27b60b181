//! Convenience re-exports for embedders.
//!
//! ```ignore
//! use sequentdb::prelude::*;
//! ```

pub use crate::aggregate::Aggregate;
pub use crate::error::{Error, Result};
pub use crate::event::EventRecord;
pub use crate::ledger::Ledger;
pub use crate::log::EventLog;
pub use crate::reducer::{EntityState, CREATE_ACTION};
pub use crate::store::EventStore;
pub use crate::types::{EntityKey, Sequence};
