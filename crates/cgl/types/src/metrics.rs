use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HASH_DIVERGENCE: &str = "hash_divergence";
pub const VALIDATION_RATE: &str = "validation_rate";
pub const PERFORMANCE_VARIANCE: &str = "performance_variance";
pub const PROOF_CHAIN_COVERAGE: &str = "proof_chain_coverage";

pub const METRIC_STABILITY: &str = "metric_stability";
pub const INSIGHT_NOVELTY: &str = "insight_novelty";
pub const ERROR_RATE_TREND: &str = "error_rate_trend";
pub const RESOURCE_EFFICIENCY: &str = "resource_efficiency";
pub const VERIFICATION_PASS_RATE: &str = "verification_pass_rate";
pub const CUMULATIVE_ERROR: &str = "cumulative_error";

/// Named metric values observed for a cycle.
///
/// Carries both the gate inputs (hash divergence, validation rate, ...) and
/// the internal signal fields; absent names are treated by consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleMetrics(BTreeMap<String, f64>);

impl CycleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neutral metrics used before any work has run.
    pub fn baseline() -> Self {
        Self::new()
            .with(HASH_DIVERGENCE, 0.0)
            .with(VALIDATION_RATE, 1.0)
            .with(PERFORMANCE_VARIANCE, 0.0)
            .with(PROOF_CHAIN_COVERAGE, 1.0)
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for CycleMetrics {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
