use crate::metrics::{
    CycleMetrics, CUMULATIVE_ERROR, ERROR_RATE_TREND, INSIGHT_NOVELTY, METRIC_STABILITY,
    RESOURCE_EFFICIENCY, VERIFICATION_PASS_RATE,
};
use serde::{Deserialize, Serialize};

/// Advisory signals derived from the loop's own behaviour.
///
/// All values are normalized to [0, 1] except `cumulative_error`, which may
/// drift past small bounds. Signals can add friction (adjusted or degraded
/// modes) and warnings, but they never terminate a loop on their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InternalSignals {
    pub metric_stability: f64,
    pub insight_novelty: f64,
    pub error_rate_trend: f64,
    pub resource_efficiency: f64,
    pub verification_pass_rate: f64,
    pub cumulative_error: f64,
}

impl InternalSignals {
    /// Signals for a loop with no history yet.
    pub fn neutral() -> Self {
        Self {
            metric_stability: 1.0,
            insight_novelty: 1.0,
            error_rate_trend: 0.0,
            resource_efficiency: 1.0,
            verification_pass_rate: 1.0,
            cumulative_error: 0.0,
        }
    }

    /// Read signals from `metrics`, falling back to neutral values.
    ///
    /// `gate_pass_rate`, when known, is the fraction of verifications so
    /// far that were not blocked, and takes precedence over any value in
    /// `metrics`.
    pub fn from_metrics(metrics: &CycleMetrics, gate_pass_rate: Option<f64>) -> Self {
        let n = Self::neutral();
        Self {
            metric_stability: metrics.get_or(METRIC_STABILITY, n.metric_stability),
            insight_novelty: metrics.get_or(INSIGHT_NOVELTY, n.insight_novelty),
            error_rate_trend: metrics.get_or(ERROR_RATE_TREND, n.error_rate_trend),
            resource_efficiency: metrics.get_or(RESOURCE_EFFICIENCY, n.resource_efficiency),
            verification_pass_rate: gate_pass_rate.unwrap_or_else(|| {
                metrics.get_or(VERIFICATION_PASS_RATE, n.verification_pass_rate)
            }),
            cumulative_error: metrics.get_or(CUMULATIVE_ERROR, n.cumulative_error),
        }
    }

    /// Weighted convergence estimate in [0, 1]. Informational only.
    pub fn convergence_indicator(&self) -> f64 {
        let score = 0.30 * self.metric_stability.clamp(0.0, 1.0)
            + 0.20 * (1.0 - self.insight_novelty.clamp(0.0, 1.0))
            + 0.20 * (1.0 - self.error_rate_trend.clamp(0.0, 1.0))
            + 0.15 * self.resource_efficiency.clamp(0.0, 1.0)
            + 0.15 * self.verification_pass_rate.clamp(0.0, 1.0);
        score.clamp(0.0, 1.0)
    }

    /// Human-readable threshold breaches.
    pub fn warnings(&self, t: &SignalThresholds) -> Vec<String> {
        let mut out = Vec::new();
        if self.metric_stability < t.min_metric_stability {
            out.push(format!(
                "metric stability {:.3} below {:.3}",
                self.metric_stability, t.min_metric_stability
            ));
        }
        if self.insight_novelty < t.min_insight_novelty {
            out.push(format!(
                "insight novelty {:.3} below {:.3} (diminishing returns)",
                self.insight_novelty, t.min_insight_novelty
            ));
        }
        if self.error_rate_trend > t.max_error_rate_trend {
            out.push(format!(
                "error rate trend {:.3} above {:.3}",
                self.error_rate_trend, t.max_error_rate_trend
            ));
        }
        if self.resource_efficiency < t.min_resource_efficiency {
            out.push(format!(
                "resource efficiency {:.3} below {:.3}",
                self.resource_efficiency, t.min_resource_efficiency
            ));
        }
        if self.verification_pass_rate < t.min_verification_pass_rate {
            out.push(format!(
                "verification pass rate {:.3} below {:.3}",
                self.verification_pass_rate, t.min_verification_pass_rate
            ));
        }
        if self.cumulative_error > t.max_cumulative_error {
            out.push(format!(
                "cumulative error {:.4} above {:.4}",
                self.cumulative_error, t.max_cumulative_error
            ));
        }
        out
    }
}

impl Default for InternalSignals {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Thresholds over [`InternalSignals`].
///
/// The same values drive warnings and the decision engine's adjustment
/// triggers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    pub min_metric_stability: f64,
    pub min_insight_novelty: f64,
    pub max_error_rate_trend: f64,
    pub min_resource_efficiency: f64,
    pub min_verification_pass_rate: f64,
    pub max_cumulative_error: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            min_metric_stability: 0.5,
            min_insight_novelty: 0.1,
            max_error_rate_trend: 0.1,
            min_resource_efficiency: 0.5,
            min_verification_pass_rate: 0.8,
            max_cumulative_error: 0.03,
        }
    }
}
