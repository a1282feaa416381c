use crate::gate::{AssumptionsGate, Bound, Gate, GateResult, MetricGate};
use crate::thresholds::GateThresholds;
use cgl_types::metrics::{
    HASH_DIVERGENCE, PERFORMANCE_VARIANCE, PROOF_CHAIN_COVERAGE, VALIDATION_RATE,
};
use cgl_types::CycleMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Counts across one evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_gates: usize,
    pub passed: usize,
    /// True when at least one gate failed.
    pub blocked: bool,
}

/// Result of running every gate once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub summary: VerificationSummary,
    pub gates: Vec<GateResult>,
    pub assumptions_verified: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl VerificationReport {
    pub fn is_blocked(&self) -> bool {
        self.summary.blocked
    }

    /// Names of the gates that failed, in evaluation order.
    pub fn failed_gates(&self) -> Vec<&str> {
        self.gates
            .iter()
            .filter(|g| !g.passed)
            .map(|g| g.gate.as_str())
            .collect()
    }

    /// Fraction of gates that passed; 1.0 for an empty battery.
    pub fn pass_rate(&self) -> f64 {
        if self.summary.total_gates == 0 {
            return 1.0;
        }
        self.summary.passed as f64 / self.summary.total_gates as f64
    }
}

/// Fixed battery of acceptance gates plus an append-only evaluation history.
pub struct VerificationGateSystem {
    thresholds: GateThresholds,
    gates: Vec<Box<dyn Gate>>,
    history: Vec<VerificationReport>,
}

impl VerificationGateSystem {
    /// Default battery built from `thresholds`.
    pub fn new(thresholds: GateThresholds) -> Self {
        let gates: Vec<Box<dyn Gate>> = vec![
            Box::new(MetricGate::new(
                HASH_DIVERGENCE,
                HASH_DIVERGENCE,
                Bound::AtMost(thresholds.max_hash_divergence),
            )),
            Box::new(MetricGate::new(
                VALIDATION_RATE,
                VALIDATION_RATE,
                Bound::AtLeast(thresholds.min_validation_rate),
            )),
            Box::new(MetricGate::new(
                PERFORMANCE_VARIANCE,
                PERFORMANCE_VARIANCE,
                Bound::AtMost(thresholds.max_performance_variance),
            )),
            Box::new(MetricGate::new(
                PROOF_CHAIN_COVERAGE,
                PROOF_CHAIN_COVERAGE,
                Bound::AtLeast(thresholds.min_proof_chain_coverage),
            )),
            Box::new(AssumptionsGate),
        ];
        Self {
            thresholds,
            gates,
            history: Vec::new(),
        }
    }

    /// Append a custom gate to the battery.
    pub fn with_gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Box::new(gate));
        self
    }

    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    pub fn gate_names(&self) -> Vec<&str> {
        self.gates.iter().map(|g| g.name()).collect()
    }

    /// Run every gate against `metrics` and record the report.
    pub fn evaluate_all(
        &mut self,
        metrics: &CycleMetrics,
        assumptions_verified: bool,
    ) -> VerificationReport {
        let gates: Vec<GateResult> = self
            .gates
            .iter()
            .map(|g| g.evaluate(metrics, assumptions_verified))
            .collect();
        let passed = gates.iter().filter(|g| g.passed).count();
        let summary = VerificationSummary {
            total_gates: gates.len(),
            passed,
            blocked: passed < gates.len(),
        };
        let report = VerificationReport {
            summary,
            gates,
            assumptions_verified,
            evaluated_at: Utc::now(),
        };

        if report.is_blocked() {
            warn!(
                failed = ?report.failed_gates(),
                passed = report.summary.passed,
                total = report.summary.total_gates,
                "verification blocked"
            );
        } else {
            debug!(total = report.summary.total_gates, "all gates passed");
        }

        self.history.push(report.clone());
        report
    }

    pub fn history(&self) -> &[VerificationReport] {
        &self.history
    }

    /// Fraction of recorded evaluations that were not blocked.
    pub fn pass_rate(&self) -> f64 {
        if self.history.is_empty() {
            return 1.0;
        }
        let clean = self.history.iter().filter(|r| !r.is_blocked()).count();
        clean as f64 / self.history.len() as f64
    }
}

impl Default for VerificationGateSystem {
    fn default() -> Self {
        Self::new(GateThresholds::default())
    }
}
