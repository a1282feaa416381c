//! All three artefacts land in the storage directory and verify on reload.

use cgl_audit::{AuditTrail, AUDIT_TRAIL_FILE};
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig, TerminationReport, REPORT_FILE};
use cgl_state_lock::{StateLockChain, STATE_CHAIN_FILE};
use cgl_tests::{sample_plan, ScriptedWorkload};

#[test]
fn files_written_and_reloadable() {
    let dir = tempfile::tempdir().unwrap();
    let config = OrchestratorConfig::default()
        .with_max_cycles(3)
        .with_storage_dir(dir.path());
    let mut orchestrator = CycleOrchestrator::new(config);
    let report = orchestrator
        .run(&sample_plan(), &mut ScriptedWorkload::new().failing_at(0))
        .unwrap();

    let chain = StateLockChain::open(dir.path().join(STATE_CHAIN_FILE)).unwrap();
    assert_eq!(chain.len(), 3);
    assert!(chain.verify_chain_integrity().valid);
    assert_eq!(chain.head_hash(), orchestrator.state_chain().head_hash());

    let trail = AuditTrail::open(dir.path().join(AUDIT_TRAIL_FILE)).unwrap();
    assert_eq!(trail.len(), orchestrator.audit_trail().len());
    assert!(trail.verify_integrity().valid);

    let raw = std::fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
    let on_disk: TerminationReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, report);
    assert!(raw.contains("\"status\": \"MAX_CYCLES_REACHED\""));
}

#[test]
fn locked_inputs_are_the_external_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = OrchestratorConfig::default().with_storage_dir(dir.path());
    let mut orchestrator = CycleOrchestrator::new(config);
    orchestrator
        .run(&sample_plan(), &mut ScriptedWorkload::new().objective_at(1))
        .unwrap();

    let chain = StateLockChain::open(dir.path().join(STATE_CHAIN_FILE)).unwrap();
    let locks = chain.locks();
    assert_eq!(locks[0].external_constraints["business_objective_met"], false);
    assert_eq!(locks[1].external_constraints["business_objective_met"], true);
    assert_eq!(locks[1].parameters["batch_size"], 64);
    assert_eq!(locks[1].previous_hash, locks[0].state_hash);
}
