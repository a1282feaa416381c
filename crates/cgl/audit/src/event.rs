use cgl_types::{hash_canonical, HashAlgorithm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of audit events emitted by the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    CycleStarted,
    StateLocked,
    VerificationCompleted,
    DecisionMade,
    CycleTerminated,
    ErrorOccurred,
    CostRecorded,
    AdjustmentApplied,
    CycleCompleted,
    ChainValidated,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CycleStarted => "CYCLE_STARTED",
            Self::StateLocked => "STATE_LOCKED",
            Self::VerificationCompleted => "VERIFICATION_COMPLETED",
            Self::DecisionMade => "DECISION_MADE",
            Self::CycleTerminated => "CYCLE_TERMINATED",
            Self::ErrorOccurred => "ERROR_OCCURRED",
            Self::CostRecorded => "COST_RECORDED",
            Self::AdjustmentApplied => "ADJUSTMENT_APPLIED",
            Self::CycleCompleted => "CYCLE_COMPLETED",
            Self::ChainValidated => "CHAIN_VALIDATED",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event severity, ordered `Debug < Info < Warning < Error < Critical`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// One entry of the audit trail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the trail, starting at 0.
    pub event_id: u64,
    pub event_type: EventType,
    pub severity: Severity,
    /// Cycle the event belongs to; `None` for run-level events.
    pub cycle_id: Option<String>,
    pub actor: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
    pub previous_hash: String,
    pub event_hash: String,
}

/// Every field of [`AuditEvent`] except `event_hash`.
#[derive(Serialize)]
struct EventHashInput<'a> {
    event_id: u64,
    event_type: EventType,
    severity: Severity,
    cycle_id: &'a Option<String>,
    actor: &'a str,
    timestamp: &'a DateTime<Utc>,
    payload: &'a Value,
    previous_hash: &'a str,
}

impl AuditEvent {
    pub(crate) fn seal(
        event_id: u64,
        event_type: EventType,
        severity: Severity,
        cycle_id: Option<String>,
        actor: String,
        payload: Value,
        previous_hash: String,
    ) -> Result<Self, serde_json::Error> {
        let mut event = Self {
            event_id,
            event_type,
            severity,
            cycle_id,
            actor,
            timestamp: Utc::now(),
            payload,
            previous_hash,
            event_hash: String::new(),
        };
        event.event_hash = event.compute_hash()?;
        Ok(event)
    }

    /// SHA3-256 over the event's canonical form, excluding `event_hash`.
    pub fn compute_hash(&self) -> Result<String, serde_json::Error> {
        hash_canonical(
            HashAlgorithm::Sha3_256,
            &EventHashInput {
                event_id: self.event_id,
                event_type: self.event_type,
                severity: self.severity,
                cycle_id: &self.cycle_id,
                actor: &self.actor,
                timestamp: &self.timestamp,
                payload: &self.payload,
                previous_hash: &self.previous_hash,
            },
        )
    }

    pub fn verify_hash(&self) -> bool {
        matches!(self.compute_hash(), Ok(h) if h == self.event_hash)
    }
}
