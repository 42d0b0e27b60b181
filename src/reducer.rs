//! Reducer contract.
//!
//! Each entity type supplies a state struct and a pure transition
//! function folding one [`EventRecord`] into it. Replay determinism is
//! the core correctness property of event sourcing: folding a stored
//! history must produce exactly the state that folding the same events
//! live produced.

use crate::error::Result;
use crate::event::EventRecord;

/// Conventional action name for the event that initializes a stream.
///
/// Every reducer must handle it; [`Aggregate::create`] synthesizes it as
/// the first event of a new stream.
///
/// [`Aggregate::create`]: crate::Aggregate::create
pub const CREATE_ACTION: &str = "create";

/// State reduced from an entity's event stream.
///
/// `Default` is the empty state a reconstruction starts from. `Clone`
/// lets the aggregate fold speculatively: a new event is applied to a
/// copy first, so a rejected event (unknown action, bad payload) leaves
/// the live state untouched and nothing durable is written.
///
/// # Contract
///
/// - `apply` must be deterministic over `(state, event)` — no clocks, no
///   randomness, no external reads. The informational `timestamp` field
///   travels with the record, so reading it is safe.
/// - The conventional [`CREATE_ACTION`] must be handled.
/// - Unrecognized actions must return [`Error::UnknownAction`] so a
///   typo'd action fails identically at commit time and during replay,
///   instead of silently no-opping in one of the two.
///
/// [`Error::UnknownAction`]: crate::Error::UnknownAction
///
/// # Example
///
/// ```
/// use sequentdb::{EntityState, EventRecord, Error, Result, CREATE_ACTION};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Counter {
///     initialized: bool,
///     count: i64,
/// }
///
/// impl EntityState for Counter {
///     fn apply(&mut self, event: &EventRecord) -> Result<()> {
///         match event.action.as_str() {
///             CREATE_ACTION => {
///                 self.initialized = true;
///                 self.count = 0;
///             }
///             "increment" => self.count += event.payload.as_i64().unwrap_or(0),
///             other => return Err(Error::UnknownAction(other.to_string())),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait EntityState: Default + Clone {
    /// Fold one event into the state.
    fn apply(&mut self, event: &EventRecord) -> Result<()>;
}
