use cgl_types::CycleMetrics;
use serde::{Deserialize, Serialize};

/// Outcome of a single gate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub gate: String,
    pub passed: bool,
    /// Observed value, if the gate reads a metric.
    pub value: Option<f64>,
    pub threshold: Option<f64>,
    pub detail: String,
}

/// A named boolean acceptance check over the current metrics.
pub trait Gate: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, metrics: &CycleMetrics, assumptions_verified: bool) -> GateResult;
}

/// Direction of a metric threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    AtMost(f64),
    AtLeast(f64),
}

impl Bound {
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::AtMost(t) => value <= t,
            Self::AtLeast(t) => value >= t,
        }
    }

    pub fn threshold(self) -> f64 {
        match self {
            Self::AtMost(t) | Self::AtLeast(t) => t,
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtMost(t) => write!(f, "<= {}", t),
            Self::AtLeast(t) => write!(f, ">= {}", t),
        }
    }
}

/// Gate comparing one named metric against a [`Bound`].
///
/// A missing or NaN metric fails the gate.
#[derive(Clone, Debug)]
pub struct MetricGate {
    name: String,
    metric: String,
    bound: Bound,
}

impl MetricGate {
    pub fn new(name: impl Into<String>, metric: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            metric: metric.into(),
            bound,
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }
}

impl Gate for MetricGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, metrics: &CycleMetrics, _assumptions_verified: bool) -> GateResult {
        let threshold = Some(self.bound.threshold());
        match metrics.get(&self.metric) {
            Some(value) => {
                let passed = self.bound.admits(value);
                GateResult {
                    gate: self.name.clone(),
                    passed,
                    value: Some(value),
                    threshold,
                    detail: format!(
                        "{} = {} (required {}){}",
                        self.metric,
                        value,
                        self.bound,
                        if passed { "" } else { ": FAILED" }
                    ),
                }
            }
            None => GateResult {
                gate: self.name.clone(),
                passed: false,
                value: None,
                threshold,
                detail: format!("metric {} not reported", self.metric),
            },
        }
    }
}

/// Passes only when the cycle's assumptions have been verified.
#[derive(Clone, Debug, Default)]
pub struct AssumptionsGate;

impl Gate for AssumptionsGate {
    fn name(&self) -> &str {
        "assumptions_verified"
    }

    fn evaluate(&self, _metrics: &CycleMetrics, assumptions_verified: bool) -> GateResult {
        GateResult {
            gate: self.name().into(),
            passed: assumptions_verified,
            value: None,
            threshold: None,
            detail: if assumptions_verified {
                "assumptions verified".into()
            } else {
                "assumptions not verified".into()
            },
        }
    }
}
