//! Shared counter entity used across the integration tests.

use sequentdb::{EntityState, Error, EventRecord, Result, CREATE_ACTION};

/// Counter state: the canonical small reducer.
///
/// Actions: `create` initializes, `increment`/`decrement` adjust the
/// count by an integer payload.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CounterState {
    pub initialized: bool,
    pub count: i64,
}

impl EntityState for CounterState {
    fn apply(&mut self, event: &EventRecord) -> Result<()> {
        match event.action.as_str() {
            CREATE_ACTION => {
                self.initialized = true;
                self.count = 0;
            }
            "increment" => self.count += delta(event)?,
            "decrement" => self.count -= delta(event)?,
            other => return Err(Error::UnknownAction(other.to_string())),
        }
        Ok(())
    }
}

fn delta(event: &EventRecord) -> Result<i64> {
    event.payload.as_i64().ok_or_else(|| {
        Error::Serialization(format!("integer payload expected, got {}", event.payload))
    })
}
