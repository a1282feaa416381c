use serde::{Deserialize, Serialize};

/// Thresholds for the default gate battery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateThresholds {
    /// Upper bound on divergence between expected and observed state hashes.
    pub max_hash_divergence: f64,
    /// Lower bound on the fraction of outputs passing validation.
    pub min_validation_rate: f64,
    /// Upper bound on cycle-to-cycle performance variance.
    pub max_performance_variance: f64,
    /// Lower bound on the fraction of claims backed by a proof chain.
    pub min_proof_chain_coverage: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            max_hash_divergence: 0.01,
            min_validation_rate: 0.95,
            max_performance_variance: 0.10,
            min_proof_chain_coverage: 0.90,
        }
    }
}

impl GateThresholds {
    /// Tighter bounds for production deployments.
    pub fn strict() -> Self {
        Self {
            max_hash_divergence: 0.0,
            min_validation_rate: 0.99,
            max_performance_variance: 0.05,
            min_proof_chain_coverage: 0.95,
        }
    }

    /// Looser bounds for exploratory runs.
    pub fn relaxed() -> Self {
        Self {
            max_hash_divergence: 0.05,
            min_validation_rate: 0.85,
            max_performance_variance: 0.25,
            min_proof_chain_coverage: 0.75,
        }
    }
}
