use serde::{Deserialize, Serialize};

/// Outcome of walking a hash chain.
///
/// Lists every discrepancy found; verification never stops at the first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    pub valid: bool,
    pub errors: Vec<String>,
    /// Number of records inspected.
    pub total: usize,
}

impl ChainVerification {
    pub fn from_errors(total: usize, errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            total,
        }
    }

    pub fn empty() -> Self {
        Self::from_errors(0, Vec::new())
    }
}
