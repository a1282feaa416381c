use cgl_types::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to hash audit event: {0}")]
    Hashing(#[from] serde_json::Error),
}

pub type AuditResult<T> = Result<T, AuditError>;
