//! Property tests: both hash chains link every record to its predecessor
//! and any single edit breaks verification.

use cgl_audit::{verify_events, AuditTrail, EventType, Severity};
use cgl_state_lock::{verify_locks, StateLockChain};
use proptest::prelude::*;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_params() -> impl Strategy<Value = Value> {
    ("[a-z]{1,8}", -1_000i64..1_000, any::<bool>())
        .prop_map(|(name, n, flag)| json!({"name": name, "n": n, "flag": flag}))
}

fn arb_event_type() -> impl Strategy<Value = EventType> {
    prop_oneof![
        Just(EventType::CycleStarted),
        Just(EventType::StateLocked),
        Just(EventType::DecisionMade),
        Just(EventType::ErrorOccurred),
        Just(EventType::CycleCompleted),
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
        Just(Severity::Critical),
    ]
}

fn build_chain(params: &[Value]) -> StateLockChain {
    let mut chain = StateLockChain::new();
    for (i, p) in params.iter().enumerate() {
        chain
            .lock_initial_state(format!("CYC-{:04}", i), p.clone(), json!({}), json!({}))
            .unwrap();
    }
    chain
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn state_chain_links_and_verifies(params in prop::collection::vec(arb_params(), 1..16)) {
        let chain = build_chain(&params);
        let locks = chain.locks();

        prop_assert_eq!(locks[0].previous_hash.as_str(), "");
        for i in 1..locks.len() {
            prop_assert_eq!(locks[i].sequence, i as u64);
            prop_assert_eq!(&locks[i].previous_hash, &locks[i - 1].state_hash);
        }
        prop_assert!(chain.verify_chain_integrity().valid);
    }

    #[test]
    fn state_chain_edit_detected(
        params in prop::collection::vec(arb_params(), 2..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let chain = build_chain(&params);
        let mut locks = chain.locks().to_vec();
        let i = pick.index(locks.len());
        locks[i].assumptions = json!({"edited": true});

        let result = verify_locks(&locks);
        prop_assert!(!result.valid);
        let prefix = format!("lock {}", i);
        prop_assert!(result.errors.iter().any(|e| e.starts_with(&prefix)));
    }

    #[test]
    fn audit_trail_links_and_verifies(
        events in prop::collection::vec((arb_event_type(), arb_severity(), 0u64..5), 1..24),
    ) {
        let mut trail = AuditTrail::new();
        for (t, s, cycle) in &events {
            let cycle_id = format!("CYC-{:04}", cycle);
            trail.record(*t, Some(cycle_id.as_str()), json!({"cycle": cycle}), *s, "prop").unwrap();
        }

        let all = trail.events();
        prop_assert_eq!(all.len(), events.len());
        for (i, e) in all.iter().enumerate() {
            prop_assert_eq!(e.event_id, i as u64);
            let expected_prev = if i == 0 { "" } else { all[i - 1].event_hash.as_str() };
            prop_assert_eq!(e.previous_hash.as_str(), expected_prev);
        }
        prop_assert!(trail.verify_integrity().valid);
    }

    #[test]
    fn audit_deletion_detected(
        n in 3usize..16,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut trail = AuditTrail::new();
        for i in 0..n {
            trail.record_info(EventType::CycleStarted, None, json!({"i": i})).unwrap();
        }
        let mut events = trail.export_all();
        // Never the tail: dropping the last event leaves a valid prefix.
        let i = pick.index(n - 1);
        events.remove(i);
        prop_assert!(!verify_events(&events).valid);
    }

    #[test]
    fn severity_filter_is_monotone(sevs in prop::collection::vec(arb_severity(), 0..20), min in arb_severity()) {
        let mut trail = AuditTrail::new();
        for s in &sevs {
            trail.record(EventType::DecisionMade, None, json!({}), *s, "prop").unwrap();
        }
        let hits = trail.query_by_severity(min);
        prop_assert_eq!(hits.len(), sevs.iter().filter(|s| **s >= min).count());
        prop_assert!(hits.iter().all(|e| e.severity >= min));
    }
}
