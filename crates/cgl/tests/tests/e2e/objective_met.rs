//! The business objective ends the loop before any further work runs.

use cgl_audit::{EventType, Severity};
use cgl_decision::CycleDecision;
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig, RunStatus};
use cgl_tests::{sample_plan, ScriptedWorkload};

#[test]
fn objective_at_cycle_two_terminates_with_two_completed() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default());
    let mut work = ScriptedWorkload::new().objective_at(2);

    let report = orchestrator.run(&sample_plan(), &mut work).unwrap();

    assert_eq!(report.status, RunStatus::Terminated);
    assert_eq!(report.cycles_completed, 2);
    assert_eq!(report.termination_reason, "business objective met");
    assert_eq!(work.executed, vec![0, 1]);
    assert!(report.chains_intact());

    let last = orchestrator.decision_engine().latest().unwrap();
    assert_eq!(last.cycle_id, "CYC-0002");
    assert_eq!(last.decision, CycleDecision::TerminateSuccess);
    assert!(orchestrator.decision_engine().is_terminated());
}

#[test]
fn cycle_two_events_in_order() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default());
    let mut work = ScriptedWorkload::new().objective_at(2);
    orchestrator.run(&sample_plan(), &mut work).unwrap();

    let types: Vec<EventType> = orchestrator
        .audit_trail()
        .query_by_cycle("CYC-0002")
        .iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            EventType::CycleStarted,
            EventType::StateLocked,
            EventType::VerificationCompleted,
            EventType::DecisionMade,
            EventType::CycleTerminated,
        ]
    );

    let decision = orchestrator
        .audit_trail()
        .query_by_cycle("CYC-0002")
        .into_iter()
        .find(|e| e.event_type == EventType::DecisionMade)
        .unwrap();
    assert_eq!(decision.severity, Severity::Warning);
    assert_eq!(decision.payload["decision"], "terminate_success");
}

#[test]
fn manual_stop_is_honoured() {
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default());
    let mut work = ScriptedWorkload::new().manual_stop_at(1);
    let report = orchestrator.run(&sample_plan(), &mut work).unwrap();

    assert_eq!(report.cycles_completed, 1);
    assert_eq!(
        orchestrator.decision_engine().latest().unwrap().decision,
        CycleDecision::TerminateManual
    );
}
