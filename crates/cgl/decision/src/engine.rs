use crate::decision::{Adjustment, CycleDecision, DecisionRecord};
use cgl_types::{ExternalConstraints, InternalSignals, SignalThresholds};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Decision engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Blocked verifications tolerated before the loop is terminated.
    pub error_limit: u32,
    /// Thresholds for warnings and adjustment triggers.
    pub signals: SignalThresholds,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            error_limit: 3,
            signals: SignalThresholds::default(),
        }
    }
}

/// Applies the fixed priority order and keeps the decision history.
///
/// The verification error counter is cumulative over the engine's lifetime;
/// a clean cycle does not reset it.
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
    error_count: u32,
    history: Vec<DecisionRecord>,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self {
            config,
            error_count: 0,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Decide for `cycle_id` and append the record to the history.
    pub fn make_decision(
        &mut self,
        cycle_id: impl Into<String>,
        external: &ExternalConstraints,
        internal: &InternalSignals,
        verification_blocked: bool,
    ) -> DecisionRecord {
        let cycle_id = cycle_id.into();
        let warnings = internal.warnings(&self.config.signals);
        let mut adjustments = Vec::new();

        let (decision, reason) = if external.business_objective_met {
            (CycleDecision::TerminateSuccess, "business objective met".to_string())
        } else if external.manual_stop_requested {
            (CycleDecision::TerminateManual, "manual stop requested".to_string())
        } else if external.time_exhausted() {
            (
                CycleDecision::TerminateTimeout,
                format!(
                    "time budget exhausted ({:.1}s of {:.1}s)",
                    external.time_elapsed_seconds, external.time_budget_seconds
                ),
            )
        } else if external.resource_exhausted() {
            (
                CycleDecision::TerminateResourceLimit,
                format!(
                    "resource budget exhausted ({:.1} of {:.1} units)",
                    external.resource_consumed_units, external.resource_budget_units
                ),
            )
        } else if external.max_cycles_reached() {
            (
                CycleDecision::TerminateMaxCycles,
                format!("max cycles reached ({})", external.max_cycles),
            )
        } else if verification_blocked {
            self.error_count += 1;
            if self.error_count >= self.config.error_limit {
                (
                    CycleDecision::TerminateErrorLimit,
                    format!(
                        "verification error limit reached ({}/{})",
                        self.error_count, self.config.error_limit
                    ),
                )
            } else {
                adjustments.push(Adjustment::Degraded {
                    error_count: self.error_count,
                    error_limit: self.config.error_limit,
                });
                (
                    CycleDecision::ContinueDegraded,
                    format!(
                        "verification blocked ({}/{}), continuing degraded",
                        self.error_count, self.config.error_limit
                    ),
                )
            }
        } else {
            adjustments = self.adjustments_for(internal);
            if adjustments.is_empty() {
                (CycleDecision::ContinueStandard, "all constraints satisfied".to_string())
            } else {
                let reason = adjustments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                (CycleDecision::ContinueAdjusted, reason)
            }
        };

        let record = DecisionRecord {
            cycle_id,
            decision,
            reason,
            external_constraints: external.clone(),
            internal_signals: internal.clone(),
            warnings,
            adjustments,
            timestamp: Utc::now(),
        };

        if decision.is_terminal() {
            info!(cycle_id = %record.cycle_id, %decision, reason = %record.reason, "loop terminating");
        } else if decision == CycleDecision::ContinueStandard {
            debug!(cycle_id = %record.cycle_id, %decision, "continuing");
        } else {
            warn!(cycle_id = %record.cycle_id, %decision, reason = %record.reason, "continuing in reduced mode");
        }

        self.history.push(record.clone());
        record
    }

    fn adjustments_for(&self, internal: &InternalSignals) -> Vec<Adjustment> {
        let t = &self.config.signals;
        let mut out = Vec::new();
        if internal.cumulative_error > t.max_cumulative_error {
            out.push(Adjustment::ReduceScope {
                cumulative_error: internal.cumulative_error,
                threshold: t.max_cumulative_error,
            });
        }
        if internal.resource_efficiency < t.min_resource_efficiency {
            out.push(Adjustment::OptimizeResources {
                resource_efficiency: internal.resource_efficiency,
                threshold: t.min_resource_efficiency,
            });
        }
        if internal.verification_pass_rate < t.min_verification_pass_rate {
            out.push(Adjustment::TightenVerification {
                verification_pass_rate: internal.verification_pass_rate,
                threshold: t.min_verification_pass_rate,
            });
        }
        out
    }

    pub fn history(&self) -> &[DecisionRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&DecisionRecord> {
        self.history.last()
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Whether the most recent decision was terminal.
    pub fn is_terminated(&self) -> bool {
        self.latest().is_some_and(DecisionRecord::is_terminal)
    }

    /// Reason of the most recent decision, if it was terminal.
    pub fn termination_reason(&self) -> Option<&str> {
        self.latest()
            .filter(|r| r.is_terminal())
            .map(|r| r.reason.as_str())
    }

    /// Number of decisions per outcome.
    pub fn decision_counts(&self) -> BTreeMap<CycleDecision, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.history {
            *counts.entry(r.decision).or_insert(0) += 1;
        }
        counts
    }
}
