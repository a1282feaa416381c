use crate::model::{CycleBenefit, CycleCost, CycleCostSnapshot};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for ROI accounting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Floor applied to the cost denominator so zero-cost cycles stay finite.
    pub epsilon: f64,
    /// Number of most recent cycles used for [`CostEvaluator::roi_trend`].
    pub trend_window: usize,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            trend_window: 5,
        }
    }
}

/// Aggregate view over every recorded cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Number of recorded cycles
    pub cycles: usize,

    /// Sum of every cycle's total cost
    pub total_cost: f64,

    /// Sum of every cycle's benefit score
    pub total_benefit: f64,

    /// Mean of per-cycle ROI
    pub average_roi: f64,

    /// `total_benefit / total_cost`, zero with no cycles
    pub cumulative_roi: f64,

    /// Resource units consumed so far
    pub total_resource_units: f64,

    /// See [`CostEvaluator::roi_trend`]
    pub roi_trend: f64,
}

/// Running cost/benefit ledger.
#[derive(Clone, Debug, Default)]
pub struct CostEvaluator {
    config: CostConfig,
    snapshots: Vec<CycleCostSnapshot>,
    cumulative_cost: f64,
    cumulative_benefit: f64,
    total_resource_units: f64,
}

impl CostEvaluator {
    /// Create an empty ledger
    pub fn new(config: CostConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    fn ratio(&self, benefit: f64, cost: f64) -> f64 {
        benefit / cost.max(self.config.epsilon)
    }

    /// Record one cycle and return its snapshot.
    pub fn record_cycle(&mut self, cost: CycleCost, benefit: CycleBenefit) -> CycleCostSnapshot {
        let total_cost = cost.total();
        let roi = self.ratio(benefit.benefit_score, total_cost);

        self.cumulative_cost += total_cost;
        self.cumulative_benefit += benefit.benefit_score;
        self.total_resource_units += cost.resource_units;

        let snapshot = CycleCostSnapshot {
            sequence: self.snapshots.len() as u64,
            cost,
            benefit,
            total_cost,
            roi,
            cumulative_cost: self.cumulative_cost,
            cumulative_benefit: self.cumulative_benefit,
            cumulative_roi: self.ratio(self.cumulative_benefit, self.cumulative_cost),
            recorded_at: Utc::now(),
        };

        debug!(
            sequence = snapshot.sequence,
            total_cost,
            roi,
            cumulative_roi = snapshot.cumulative_roi,
            "cycle cost recorded"
        );

        self.snapshots.push(snapshot.clone());
        snapshot
    }

    /// Every recorded snapshot, oldest first
    pub fn snapshots(&self) -> &[CycleCostSnapshot] {
        &self.snapshots
    }

    /// Total cost across all cycles
    pub fn cumulative_cost(&self) -> f64 {
        self.cumulative_cost
    }

    /// Resource units consumed; checked against the resource budget
    pub fn total_resource_units(&self) -> f64 {
        self.total_resource_units
    }

    /// Least-squares slope of ROI over the trailing window.
    ///
    /// Positive means returns are improving. Zero with fewer than two cycles.
    pub fn roi_trend(&self) -> f64 {
        let start = self.snapshots.len().saturating_sub(self.config.trend_window.max(2));
        let window = &self.snapshots[start..];
        let n = window.len();
        if n < 2 {
            return 0.0;
        }

        let mean_x = (n - 1) as f64 / 2.0;
        let mean_y = window.iter().map(|s| s.roi).sum::<f64>() / n as f64;
        let (mut num, mut den) = (0.0, 0.0);
        for (i, s) in window.iter().enumerate() {
            let dx = i as f64 - mean_x;
            num += dx * (s.roi - mean_y);
            den += dx * dx;
        }
        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    }

    /// Aggregate view for the termination report
    pub fn summary(&self) -> CostSummary {
        let cycles = self.snapshots.len();
        let average_roi = if cycles == 0 {
            0.0
        } else {
            self.snapshots.iter().map(|s| s.roi).sum::<f64>() / cycles as f64
        };
        CostSummary {
            cycles,
            total_cost: self.cumulative_cost,
            total_benefit: self.cumulative_benefit,
            average_roi,
            cumulative_roi: if cycles == 0 {
                0.0
            } else {
                self.ratio(self.cumulative_benefit, self.cumulative_cost)
            },
            total_resource_units: self.total_resource_units,
            roi_trend: self.roi_trend(),
        }
    }
}
