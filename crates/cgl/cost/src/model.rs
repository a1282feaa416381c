use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cost incurred by one cycle, in caller-defined units.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleCost {
    pub compute_cost: f64,
    pub io_cost: f64,
    pub overhead_cost: f64,
    /// Units counted against the resource budget.
    pub resource_units: f64,
}

impl CycleCost {
    pub fn new(compute_cost: f64, io_cost: f64, overhead_cost: f64) -> Self {
        Self {
            compute_cost,
            io_cost,
            overhead_cost,
            resource_units: 0.0,
        }
    }

    pub fn with_resource_units(mut self, units: f64) -> Self {
        self.resource_units = units;
        self
    }

    pub fn total(&self) -> f64 {
        self.compute_cost + self.io_cost + self.overhead_cost
    }
}

/// Value produced by one cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleBenefit {
    pub benefit_score: f64,
    pub quality_gain: f64,
    pub novel_insights: u32,
}

impl CycleBenefit {
    pub fn new(benefit_score: f64) -> Self {
        Self {
            benefit_score,
            ..Default::default()
        }
    }

    pub fn with_quality_gain(mut self, gain: f64) -> Self {
        self.quality_gain = gain;
        self
    }

    pub fn with_novel_insights(mut self, n: u32) -> Self {
        self.novel_insights = n;
        self
    }
}

/// Accounting entry for one recorded cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleCostSnapshot {
    pub sequence: u64,
    pub cost: CycleCost,
    pub benefit: CycleBenefit,
    pub total_cost: f64,
    pub roi: f64,
    pub cumulative_cost: f64,
    pub cumulative_benefit: f64,
    pub cumulative_roi: f64,
    pub recorded_at: DateTime<Utc>,
}
