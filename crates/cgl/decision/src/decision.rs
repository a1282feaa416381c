use cgl_types::{ExternalConstraints, InternalSignals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one decision point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleDecision {
    TerminateSuccess,
    TerminateTimeout,
    TerminateResourceLimit,
    TerminateErrorLimit,
    TerminateMaxCycles,
    TerminateManual,
    ContinueStandard,
    ContinueAdjusted,
    ContinueDegraded,
}

impl CycleDecision {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::TerminateSuccess
                | Self::TerminateTimeout
                | Self::TerminateResourceLimit
                | Self::TerminateErrorLimit
                | Self::TerminateMaxCycles
                | Self::TerminateManual
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TerminateSuccess => "terminate_success",
            Self::TerminateTimeout => "terminate_timeout",
            Self::TerminateResourceLimit => "terminate_resource_limit",
            Self::TerminateErrorLimit => "terminate_error_limit",
            Self::TerminateMaxCycles => "terminate_max_cycles",
            Self::TerminateManual => "terminate_manual",
            Self::ContinueStandard => "continue_standard",
            Self::ContinueAdjusted => "continue_adjusted",
            Self::ContinueDegraded => "continue_degraded",
        }
    }
}

impl std::fmt::Display for CycleDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating-mode change attached to a continue decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Cumulative error drifted past its bound; narrow the work.
    ReduceScope { cumulative_error: f64, threshold: f64 },
    OptimizeResources { resource_efficiency: f64, threshold: f64 },
    TightenVerification { verification_pass_rate: f64, threshold: f64 },
    /// Verification blocked but the error limit is not yet reached.
    Degraded { error_count: u32, error_limit: u32 },
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReduceScope {
                cumulative_error,
                threshold,
            } => write!(
                f,
                "reduce scope: cumulative error {:.4} > {:.4}",
                cumulative_error, threshold
            ),
            Self::OptimizeResources {
                resource_efficiency,
                threshold,
            } => write!(
                f,
                "optimize resources: efficiency {:.3} < {:.3}",
                resource_efficiency, threshold
            ),
            Self::TightenVerification {
                verification_pass_rate,
                threshold,
            } => write!(
                f,
                "tighten verification: pass rate {:.3} < {:.3}",
                verification_pass_rate, threshold
            ),
            Self::Degraded {
                error_count,
                error_limit,
            } => write!(f, "degraded: {}/{} verification errors", error_count, error_limit),
        }
    }
}

/// Immutable record of one decision and everything it was based on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub cycle_id: String,
    pub decision: CycleDecision,
    pub reason: String,
    pub external_constraints: ExternalConstraints,
    pub internal_signals: InternalSignals,
    pub warnings: Vec<String>,
    pub adjustments: Vec<Adjustment>,
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn is_terminal(&self) -> bool {
        self.decision.is_terminal()
    }
}
