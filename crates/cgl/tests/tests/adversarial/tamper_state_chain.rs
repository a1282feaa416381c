//! Adversarial test: edits to a persisted state chain are detected after
//! reload, and the error names the affected lock.

use cgl_state_lock::{StateLock, StateLockChain, STATE_CHAIN_FILE};
use cgl_types::storage::{read_json, write_json};
use serde_json::json;
use std::path::Path;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn persisted_chain(dir: &Path, n: usize) -> std::path::PathBuf {
    let path = dir.join(STATE_CHAIN_FILE);
    let mut chain = StateLockChain::with_storage(&path);
    for i in 0..n {
        chain
            .lock_initial_state(
                format!("CYC-{:04}", i),
                json!({"threshold": 0.5, "iteration": i}),
                json!({"sensor_calibrated": true}),
                json!({"business_objective_met": false, "manual_stop": false}),
            )
            .unwrap();
    }
    path
}

fn tamper(path: &Path, edit: impl FnOnce(&mut Vec<StateLock>)) {
    let mut locks: Vec<StateLock> = read_json(path).unwrap();
    edit(&mut locks);
    write_json(path, &locks).unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn untouched_chain_verifies_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = persisted_chain(dir.path(), 4);
    assert!(StateLockChain::open(&path).unwrap().verify_chain_integrity().valid);
}

#[test]
fn edited_parameters_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = persisted_chain(dir.path(), 4);
    tamper(&path, |locks| locks[2].parameters["threshold"] = json!(0.9));

    let result = StateLockChain::open(&path).unwrap().verify_chain_integrity();
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.starts_with("lock 2")));
    assert!(!result.errors.iter().any(|e| e.starts_with("lock 3")));
}

#[test]
fn rehashed_lock_breaks_successor_link() {
    let dir = tempfile::tempdir().unwrap();
    let path = persisted_chain(dir.path(), 4);
    tamper(&path, |locks| {
        locks[1].external_constraints["business_objective_met"] = json!(true);
        locks[1].state_hash = locks[1].compute_hash().unwrap();
    });

    let result = StateLockChain::open(&path).unwrap().verify_chain_integrity();
    assert!(!result.valid);
    assert!(result
        .errors
        .iter()
        .any(|e| e.starts_with("lock 2") && e.contains("previous_hash")));
}

#[test]
fn deleted_lock_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = persisted_chain(dir.path(), 5);
    tamper(&path, |locks| {
        locks.remove(1);
    });

    let result = StateLockChain::open(&path).unwrap().verify_chain_integrity();
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.starts_with("lock 1")));
}

#[test]
fn swapped_timestamps_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = persisted_chain(dir.path(), 3);
    tamper(&path, |locks| {
        locks[0].timestamp = locks[0].timestamp - chrono::Duration::seconds(30);
    });

    let result = StateLockChain::open(&path).unwrap().verify_chain_integrity();
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.starts_with("lock 0")));
}
