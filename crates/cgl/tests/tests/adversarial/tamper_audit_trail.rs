//! Adversarial test: rewriting history in a persisted audit trail is
//! detected, including attempts to hide an error event.

use cgl_audit::{AuditEvent, AuditTrail, EventType, Severity, AUDIT_TRAIL_FILE};
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig};
use cgl_tests::{sample_plan, ScriptedWorkload};
use cgl_types::storage::{read_json, write_json};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run a short loop with one failed cycle and return the trail path.
fn run_with_failure(dir: &Path) -> PathBuf {
    let config = OrchestratorConfig::default()
        .with_max_cycles(3)
        .with_storage_dir(dir);
    let mut orchestrator = CycleOrchestrator::new(config);
    orchestrator
        .run(&sample_plan(), &mut ScriptedWorkload::new().failing_at(1))
        .unwrap();
    dir.join(AUDIT_TRAIL_FILE)
}

fn load(path: &Path) -> Vec<AuditEvent> {
    read_json(path).unwrap()
}

fn error_index(events: &[AuditEvent]) -> usize {
    events
        .iter()
        .position(|e| e.event_type == EventType::ErrorOccurred)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn downgraded_severity_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = run_with_failure(dir.path());
    let mut events = load(&path);
    let i = error_index(&events);
    events[i].severity = Severity::Debug;
    write_json(&path, &events).unwrap();

    let trail = AuditTrail::open(&path).unwrap();
    let result = trail.verify_integrity();
    assert!(!result.valid);
    let prefix = format!("event {}", i);
    assert!(result.errors.iter().any(|e| e.starts_with(&prefix)));
    assert!(!AuditTrail::verify_event(&trail.events()[i]));
}

#[test]
fn removed_error_event_detected() {
    let dir = tempfile::tempdir().unwrap();
    let path = run_with_failure(dir.path());
    let mut events = load(&path);
    let i = error_index(&events);
    events.remove(i);
    write_json(&path, &events).unwrap();

    let trail = AuditTrail::open(&path).unwrap();
    assert!(trail.query_by_type(EventType::ErrorOccurred).is_empty());
    let result = trail.verify_integrity();
    assert!(!result.valid);
    let prefix = format!("event {}", i);
    assert!(result.errors.iter().any(|e| e.starts_with(&prefix)));
}

#[test]
fn forged_event_with_valid_hash_still_breaks_linkage() {
    let dir = tempfile::tempdir().unwrap();
    let path = run_with_failure(dir.path());
    let mut events = load(&path);
    let i = error_index(&events);
    events[i].payload = serde_json::json!({"error": "nothing to see"});
    events[i].event_hash = events[i].compute_hash().unwrap();
    write_json(&path, &events).unwrap();

    let result = AuditTrail::open(&path).unwrap().verify_integrity();
    assert!(!result.valid);
    let prefix = format!("event {}", i + 1);
    assert!(result
        .errors
        .iter()
        .any(|e| e.starts_with(&prefix) && e.contains("broken link")));
}

#[test]
fn appending_to_tampered_trail_keeps_it_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = run_with_failure(dir.path());
    let mut events = load(&path);
    events[0].actor = "someone-else".into();
    write_json(&path, &events).unwrap();

    let mut trail = AuditTrail::open(&path).unwrap();
    trail
        .record_info(EventType::ChainValidated, None, serde_json::json!({}))
        .unwrap();
    assert!(!trail.verify_integrity().valid);
}
