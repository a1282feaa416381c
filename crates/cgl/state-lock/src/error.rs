use cgl_types::StorageError;

/// Errors from the state lock chain.
///
/// Only persistence and serialization can fail; integrity findings are
/// returned as data.
#[derive(Debug, thiserror::Error)]
pub enum StateLockError {
    #[error("state chain storage: {0}")]
    Storage(#[from] StorageError),
    #[error("state lock hashing: {0}")]
    Hashing(#[from] serde_json::Error),
}

pub type StateLockResult<T> = Result<T, StateLockError>;
