use cgl_cost::CostSummary;
use cgl_types::ChainVerification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File name of the report inside the storage directory.
pub const REPORT_FILE: &str = "closed_loop_report.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// A terminal decision ended the loop.
    Terminated,
    /// The cycle cap ran out without a terminal decision.
    MaxCyclesReached,
}

/// Final account of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerminationReport {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub termination_reason: String,
    pub cycles_completed: u64,
    pub state_chain_integrity: ChainVerification,
    pub audit_chain_integrity: ChainVerification,
    pub cost_summary: CostSummary,
    pub decision_history_length: usize,
    pub verification_history_length: usize,
    pub timestamp: DateTime<Utc>,
}

impl TerminationReport {
    pub fn chains_intact(&self) -> bool {
        self.state_chain_integrity.valid && self.audit_chain_integrity.valid
    }
}
