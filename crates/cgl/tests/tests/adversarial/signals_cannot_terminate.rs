//! Adversarial test: a workload reporting terrible internal signals can
//! push the loop into adjusted mode but can never stop it.

use cgl_audit::EventType;
use cgl_decision::CycleDecision;
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig, RunStatus};
use cgl_tests::{sample_plan, ScriptedWorkload};
use cgl_types::metrics::{
    CUMULATIVE_ERROR, ERROR_RATE_TREND, INSIGHT_NOVELTY, METRIC_STABILITY, RESOURCE_EFFICIENCY,
};
use cgl_types::CycleMetrics;

#[test]
fn bad_signals_only_adjust() {
    let metrics = CycleMetrics::baseline()
        .with(METRIC_STABILITY, 0.0)
        .with(INSIGHT_NOVELTY, 0.0)
        .with(ERROR_RATE_TREND, 1.0)
        .with(RESOURCE_EFFICIENCY, 0.0)
        .with(CUMULATIVE_ERROR, 10.0);
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default().with_max_cycles(6));
    let mut work = ScriptedWorkload::new().reporting(metrics);

    let report = orchestrator.run(&sample_plan(), &mut work).unwrap();

    assert_eq!(report.status, RunStatus::MaxCyclesReached);
    assert_eq!(report.cycles_completed, 6);

    let history = orchestrator.decision_engine().history();
    assert_eq!(history[0].decision, CycleDecision::ContinueStandard);
    for record in &history[1..] {
        assert_eq!(record.decision, CycleDecision::ContinueAdjusted);
        assert!(!record.warnings.is_empty());
    }
    assert_eq!(
        orchestrator
            .audit_trail()
            .query_by_type(EventType::AdjustmentApplied)
            .len(),
        5
    );
}

#[test]
fn failing_gates_reach_the_error_limit_instead() {
    let metrics = CycleMetrics::baseline().with(cgl_types::metrics::HASH_DIVERGENCE, 0.5);
    let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default());
    let mut work = ScriptedWorkload::new().reporting(metrics);

    let report = orchestrator.run(&sample_plan(), &mut work).unwrap();

    // Cycle 0 uses the baseline; cycles 1 and 2 degrade; cycle 3 terminates.
    assert_eq!(report.status, RunStatus::Terminated);
    assert_eq!(report.cycles_completed, 3);
    assert_eq!(
        orchestrator.decision_engine().latest().unwrap().decision,
        CycleDecision::TerminateErrorLimit
    );
    assert!(report.chains_intact());
}
