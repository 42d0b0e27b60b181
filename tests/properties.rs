//! Property tests for replay determinism and gap-free sequencing.

mod common;

use common::CounterState;
use proptest::prelude::*;
use sequentdb::{EntityKey, Ledger};
use serde_json::json;

proptest! {
    /// For any finite op sequence: the live state equals the arithmetic
    /// sum, a fresh load reproduces it exactly, and the persisted
    /// sequences are exactly {1..N}.
    #[test]
    fn prop_replay_matches_live(ops in proptest::collection::vec((any::<bool>(), 0i64..100), 0..40)) {
        let ledger = Ledger::ephemeral();
        let mut m = ledger.create::<CounterState>("foobar", json!({})).unwrap();

        let mut expected = 0i64;
        for (increment, value) in &ops {
            if *increment {
                expected += value;
                m.mutate("increment", json!(value)).unwrap();
            } else {
                expected -= value;
                m.mutate("decrement", json!(value)).unwrap();
            }
        }

        let total = ops.len() as u64 + 1;
        prop_assert!(m.state().initialized);
        prop_assert_eq!(m.state().count, expected);
        prop_assert_eq!(m.applied_version(), total);
        prop_assert_eq!(m.committed_version(), total);

        let replayed = ledger.load::<CounterState>("foobar").unwrap();
        prop_assert_eq!(replayed.state(), m.state());
        prop_assert_eq!(replayed.applied_version(), total);

        let records = ledger.log().scan(&EntityKey::new("foobar")).unwrap();
        let sequences: Vec<u64> = records.iter().map(|r| r.sequence).collect();
        let want: Vec<u64> = (1..=total).collect();
        prop_assert_eq!(sequences, want);
    }

    /// Local-only mutations advance applied_version without ever
    /// touching the store.
    #[test]
    fn prop_local_mutations_are_not_durable(values in proptest::collection::vec(0i64..100, 1..20)) {
        let ledger = Ledger::ephemeral();
        let mut m = ledger.create::<CounterState>("foobar", json!({})).unwrap();

        let mut expected = 0i64;
        for value in &values {
            expected += value;
            m.mutate_local("increment", json!(value)).unwrap();
        }

        prop_assert_eq!(m.state().count, expected);
        prop_assert_eq!(m.applied_version(), values.len() as u64 + 1);
        prop_assert_eq!(m.committed_version(), 1);
        prop_assert_eq!(
            ledger.log().latest_sequence(&EntityKey::new("foobar")).unwrap(),
            1
        );
    }
}
