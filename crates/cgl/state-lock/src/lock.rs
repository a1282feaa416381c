use cgl_types::{hash_canonical, HashAlgorithm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable, hashed snapshot of one cycle's governing inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateLock {
    /// Label only; not part of `state_hash`.
    pub cycle_id: String,
    /// Position in the chain, starting at 0.
    pub sequence: u64,
    /// SHA-256 hex over the canonical hash input.
    pub state_hash: String,
    /// `state_hash` of the preceding lock, or `""` for the first.
    pub previous_hash: String,
    pub timestamp: DateTime<Utc>,
    pub parameters: Value,
    pub assumptions: Value,
    pub external_constraints: Value,
}

/// Exactly the fields covered by `state_hash`.
#[derive(Serialize)]
struct LockHashInput<'a> {
    parameters: &'a Value,
    assumptions: &'a Value,
    external_constraints: &'a Value,
    timestamp: &'a DateTime<Utc>,
    previous_hash: &'a str,
}

impl StateLock {
    pub(crate) fn seal(
        cycle_id: String,
        sequence: u64,
        previous_hash: String,
        parameters: Value,
        assumptions: Value,
        external_constraints: Value,
    ) -> Result<Self, serde_json::Error> {
        let timestamp = Utc::now();
        let state_hash = Self::hash_fields(
            &parameters,
            &assumptions,
            &external_constraints,
            &timestamp,
            &previous_hash,
        )?;
        Ok(Self {
            cycle_id,
            sequence,
            state_hash,
            previous_hash,
            timestamp,
            parameters,
            assumptions,
            external_constraints,
        })
    }

    fn hash_fields(
        parameters: &Value,
        assumptions: &Value,
        external_constraints: &Value,
        timestamp: &DateTime<Utc>,
        previous_hash: &str,
    ) -> Result<String, serde_json::Error> {
        hash_canonical(
            HashAlgorithm::Sha256,
            &LockHashInput {
                parameters,
                assumptions,
                external_constraints,
                timestamp,
                previous_hash,
            },
        )
    }

    /// Recompute the hash from the stored fields.
    pub fn compute_hash(&self) -> Result<String, serde_json::Error> {
        Self::hash_fields(
            &self.parameters,
            &self.assumptions,
            &self.external_constraints,
            &self.timestamp,
            &self.previous_hash,
        )
    }

    /// Stored hash matches the stored fields?
    pub fn verify_hash(&self) -> bool {
        self.compute_hash()
            .map(|h| h == self.state_hash)
            .unwrap_or(false)
    }
}
