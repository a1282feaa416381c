use crate::error::StateLockResult;
use crate::lock::StateLock;
use cgl_types::storage::{read_json_or_default, write_json};
use cgl_types::ChainVerification;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the persisted chain inside a storage directory.
pub const STATE_CHAIN_FILE: &str = "state_chain.json";

/// Append-only chain of [`StateLock`]s.
///
/// When a storage path is configured, the whole chain is rewritten to it
/// after every lock.
#[derive(Debug, Default)]
pub struct StateLockChain {
    locks: Vec<StateLock>,
    storage_path: Option<PathBuf>,
}

impl StateLockChain {
    /// In-memory chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty chain persisted to `path` on every lock.
    pub fn with_storage(path: impl Into<PathBuf>) -> Self {
        Self {
            locks: Vec::new(),
            storage_path: Some(path.into()),
        }
    }

    /// Reload a persisted chain and continue appending to it.
    ///
    /// A missing file starts an empty chain. The loaded chain is not
    /// rejected when broken; call [`Self::verify_chain_integrity`].
    pub fn open(path: impl Into<PathBuf>) -> StateLockResult<Self> {
        let path = path.into();
        let locks: Vec<StateLock> = read_json_or_default(&path)?;
        info!(path = %path.display(), locks = locks.len(), "state chain opened");
        Ok(Self {
            locks,
            storage_path: Some(path),
        })
    }

    /// Lock the inputs governing `cycle_id`.
    ///
    /// The new lock's sequence is the current chain length and its
    /// previous hash is the head hash (`""` for the first lock).
    pub fn lock_initial_state(
        &mut self,
        cycle_id: impl Into<String>,
        parameters: Value,
        assumptions: Value,
        external_constraints: Value,
    ) -> StateLockResult<&StateLock> {
        let sequence = self.locks.len() as u64;
        let previous_hash = self.head_hash().unwrap_or_default().to_string();
        let lock = StateLock::seal(
            cycle_id.into(),
            sequence,
            previous_hash,
            parameters,
            assumptions,
            external_constraints,
        )?;

        debug!(
            cycle_id = %lock.cycle_id,
            sequence,
            state_hash = %lock.state_hash,
            "state locked"
        );
        self.locks.push(lock);
        self.persist()?;

        Ok(&self.locks[self.locks.len() - 1])
    }

    /// Walk the chain checking sequence, linkage and hashes.
    pub fn verify_chain_integrity(&self) -> ChainVerification {
        let result = verify_locks(&self.locks);
        if !result.valid {
            warn!(errors = result.errors.len(), "state chain integrity violated");
        }
        result
    }

    pub fn locks(&self) -> &[StateLock] {
        &self.locks
    }

    pub fn latest(&self) -> Option<&StateLock> {
        self.locks.last()
    }

    pub fn head_hash(&self) -> Option<&str> {
        self.locks.last().map(|l| l.state_hash.as_str())
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    fn persist(&self) -> StateLockResult<()> {
        if let Some(path) = &self.storage_path {
            write_json(path, &self.locks)?;
        }
        Ok(())
    }
}

/// Verify an arbitrary slice of locks, e.g. one read back from disk.
///
/// Every discrepancy is reported, not just the first. `cycle_id` is a label
/// outside `state_hash` and is not checked, so relabelling a lock goes
/// unnoticed; `sequence` is checked through its position instead.
pub fn verify_locks(locks: &[StateLock]) -> ChainVerification {
    let mut errors = Vec::new();

    for (i, lock) in locks.iter().enumerate() {
        if lock.sequence != i as u64 {
            errors.push(format!(
                "lock {}: sequence {} breaks monotonic order (expected {})",
                i, lock.sequence, i
            ));
        }

        let expected_prev = if i == 0 {
            ""
        } else {
            locks[i - 1].state_hash.as_str()
        };
        if lock.previous_hash != expected_prev {
            errors.push(format!(
                "lock {} ({}): previous_hash {:?} does not match {:?}",
                i, lock.cycle_id, lock.previous_hash, expected_prev
            ));
        }

        match lock.compute_hash() {
            Ok(computed) if computed == lock.state_hash => {}
            Ok(computed) => errors.push(format!(
                "lock {} ({}): state_hash mismatch (stored {}, computed {})",
                i, lock.cycle_id, lock.state_hash, computed
            )),
            Err(e) => errors.push(format!(
                "lock {} ({}): cannot recompute hash: {}",
                i, lock.cycle_id, e
            )),
        }
    }

    ChainVerification::from_errors(locks.len(), errors)
}
