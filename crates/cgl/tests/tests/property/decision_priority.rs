//! Property tests: the first matching rule in the fixed priority order
//! always wins, whatever combination of conditions holds.

use cgl_decision::{CycleDecision, DecisionEngine};
use cgl_types::{ExternalConstraints, InternalSignals};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Conditions {
    objective: bool,
    manual: bool,
    timeout: bool,
    resources: bool,
    max_cycles: bool,
    blocked: bool,
}

fn arb_conditions() -> impl Strategy<Value = Conditions> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(objective, manual, timeout, resources, max_cycles, blocked)| Conditions {
            objective,
            manual,
            timeout,
            resources,
            max_cycles,
            blocked,
        })
}

fn arb_signals() -> impl Strategy<Value = InternalSignals> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(a, b, c, d, e, f)| InternalSignals {
            metric_stability: a,
            insight_novelty: b,
            error_rate_trend: c,
            resource_efficiency: d,
            verification_pass_rate: e,
            cumulative_error: f,
        },
    )
}

fn constraints(c: &Conditions) -> ExternalConstraints {
    let mut ext = ExternalConstraints::with_budgets(60.0, 100.0, 10);
    ext.business_objective_met = c.objective;
    ext.manual_stop_requested = c.manual;
    ext.time_elapsed_seconds = if c.timeout { 60.0 } else { 1.0 };
    ext.resource_consumed_units = if c.resources { 150.0 } else { 10.0 };
    ext.current_cycle = if c.max_cycles { 10 } else { 3 };
    ext
}

fn expected(c: &Conditions) -> Option<CycleDecision> {
    if c.objective {
        Some(CycleDecision::TerminateSuccess)
    } else if c.manual {
        Some(CycleDecision::TerminateManual)
    } else if c.timeout {
        Some(CycleDecision::TerminateTimeout)
    } else if c.resources {
        Some(CycleDecision::TerminateResourceLimit)
    } else if c.max_cycles {
        Some(CycleDecision::TerminateMaxCycles)
    } else if c.blocked {
        // First blocked verification with the default limit of 3.
        Some(CycleDecision::ContinueDegraded)
    } else {
        None
    }
}

proptest! {
    #[test]
    fn first_matching_rule_wins(c in arb_conditions(), signals in arb_signals()) {
        let mut engine = DecisionEngine::default();
        let record = engine.make_decision("CYC-0003", &constraints(&c), &signals, c.blocked);

        match expected(&c) {
            Some(d) => prop_assert_eq!(record.decision, d),
            None => prop_assert!(matches!(
                record.decision,
                CycleDecision::ContinueStandard | CycleDecision::ContinueAdjusted
            )),
        }
        prop_assert_eq!(engine.history().len(), 1);
        prop_assert_eq!(engine.is_terminated(), record.decision.is_terminal());
    }

    #[test]
    fn signals_alone_never_terminate(signals in arb_signals()) {
        let mut engine = DecisionEngine::default();
        let ext = ExternalConstraints::with_budgets(60.0, 100.0, 10);
        let record = engine.make_decision("CYC-0000", &ext, &signals, false);
        prop_assert!(!record.decision.is_terminal());
        prop_assert_eq!(
            record.decision == CycleDecision::ContinueAdjusted,
            !record.adjustments.is_empty()
        );
    }

    #[test]
    fn external_terminations_do_not_count_errors(c in arb_conditions()) {
        prop_assume!(c.objective || c.manual || c.timeout || c.resources || c.max_cycles);
        let mut engine = DecisionEngine::default();
        engine.make_decision("CYC-0000", &constraints(&c), &InternalSignals::neutral(), true);
        prop_assert_eq!(engine.error_count(), 0);
    }
}
