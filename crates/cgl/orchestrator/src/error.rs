use cgl_audit::AuditError;
use cgl_state_lock::StateLockError;
use cgl_types::StorageError;
use thiserror::Error;

/// Errors that abort a run.
///
/// Work failures are not among them: those are audited and the loop
/// carries on.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("state chain: {0}")]
    StateLock(#[from] StateLockError),

    #[error("audit trail: {0}")]
    Audit(#[from] AuditError),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration: {0}")]
    Config(String),

    #[error("loop already terminated: {0}")]
    Terminated(String),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
