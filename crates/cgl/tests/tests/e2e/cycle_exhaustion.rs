//! A loop with no stop signal runs exactly `max_cycles` cycles.

use cgl_audit::EventType;
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig, RunStatus};
use cgl_tests::{sample_plan, ScriptedWorkload};

#[test]
fn five_cycles_then_max_cycles_reached() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default().with_max_cycles(5));
    let mut work = ScriptedWorkload::new();

    let report = orchestrator.run(&sample_plan(), &mut work).unwrap();

    assert_eq!(report.status, RunStatus::MaxCyclesReached);
    assert_eq!(report.cycles_completed, 5);
    assert_eq!(work.executed, vec![0, 1, 2, 3, 4]);
    assert_eq!(report.decision_history_length, 5);
    assert_eq!(report.verification_history_length, 5);
    assert_eq!(orchestrator.state_chain().len(), 5);
    assert!(report.chains_intact());
}

#[test]
fn cost_summary_covers_every_cycle() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default().with_max_cycles(5));
    let report = orchestrator
        .run(&sample_plan(), &mut ScriptedWorkload::new())
        .unwrap();

    let summary = &report.cost_summary;
    assert_eq!(summary.cycles, 5);
    assert!((summary.total_cost - 6.25).abs() < 1e-9);
    assert!((summary.total_benefit - 12.5).abs() < 1e-9);
    assert!((summary.cumulative_roi - 2.0).abs() < 1e-9);
    assert_eq!(summary.total_resource_units, 5.0);
    assert!(summary.roi_trend.abs() < 1e-9);
}

#[test]
fn chain_validated_is_the_last_event() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default().with_max_cycles(2));
    orchestrator
        .run(&sample_plan(), &mut ScriptedWorkload::new())
        .unwrap();

    let last = orchestrator.audit_trail().events().last().unwrap();
    assert_eq!(last.event_type, EventType::ChainValidated);
    assert!(last.cycle_id.is_none());
    assert_eq!(last.payload["state_chain_valid"], true);
    assert_eq!(last.payload["audit_chain_valid"], true);
}
