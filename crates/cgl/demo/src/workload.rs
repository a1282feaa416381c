//! Simulated optimisation workload for the demo.
//!
//! Each cycle nudges a model-quality figure toward its target with
//! diminishing gains, and reports metrics that settle as it converges.

use cgl_cost::{CycleBenefit, CycleCost};
use cgl_orchestrator::{CycleContext, CycleHooks, WorkError, WorkOutput};
use cgl_types::metrics::{
    CUMULATIVE_ERROR, ERROR_RATE_TREND, HASH_DIVERGENCE, INSIGHT_NOVELTY, METRIC_STABILITY,
    PERFORMANCE_VARIANCE, PROOF_CHAIN_COVERAGE, RESOURCE_EFFICIENCY, VALIDATION_RATE,
};
use cgl_types::{CycleMetrics, ExternalInputs};
use serde_json::json;

pub struct SimulatedWorkload {
    quality: f64,
    target: f64,
    last_gain: f64,
    failures: u32,
    fail_cycle: Option<u64>,
    objective_at: Option<u64>,
}

impl SimulatedWorkload {
    pub fn new(target: f64, fail_cycle: Option<u64>, objective_at: Option<u64>) -> Self {
        Self {
            quality: 0.6,
            target,
            last_gain: 0.0,
            failures: 0,
            fail_cycle,
            objective_at,
        }
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }
}

impl CycleHooks for SimulatedWorkload {
    fn execute(&mut self, ctx: &CycleContext) -> Result<WorkOutput, WorkError> {
        if self.fail_cycle == Some(ctx.sequence()) {
            self.failures += 1;
            return Err(WorkError::new(format!(
                "simulated evaluation crash in {}",
                ctx.cycle_id()
            )));
        }

        // Half the remaining gap each cycle.
        let gain = (self.target - self.quality).max(0.0) * 0.5;
        self.quality += gain;
        self.last_gain = gain;
        Ok(json!({
            "status": "ok",
            "quality": self.quality,
            "gain": gain,
            "mode": ctx.decision().as_str(),
        }))
    }

    fn metrics(&mut self, sequence: u64, output: &WorkOutput) -> CycleMetrics {
        let settled = 1.0 / (1.0 + sequence as f64);
        let failed = output["status"] == "error";
        CycleMetrics::baseline()
            .with(HASH_DIVERGENCE, 0.0)
            .with(VALIDATION_RATE, if failed { 0.9 } else { 0.96 + 0.03 * (1.0 - settled) })
            .with(PERFORMANCE_VARIANCE, 0.08 * settled)
            .with(PROOF_CHAIN_COVERAGE, 0.95)
            .with(METRIC_STABILITY, 1.0 - 0.5 * settled)
            .with(INSIGHT_NOVELTY, (self.last_gain * 5.0).min(1.0))
            .with(ERROR_RATE_TREND, if failed { 0.2 } else { 0.0 })
            .with(RESOURCE_EFFICIENCY, 0.7 + 0.2 * (1.0 - settled))
            .with(CUMULATIVE_ERROR, 0.01 * f64::from(self.failures))
    }

    fn cost(&mut self, _sequence: u64, output: &WorkOutput) -> CycleCost {
        let io = if output["status"] == "error" { 0.5 } else { 1.0 };
        CycleCost::new(4.0, io, 0.5).with_resource_units(25.0)
    }

    fn benefit(&mut self, _sequence: u64, output: &WorkOutput) -> CycleBenefit {
        let gain = output["gain"].as_f64().unwrap_or(0.0);
        CycleBenefit::new(gain * 100.0)
            .with_quality_gain(gain)
            .with_novel_insights(u32::from(gain > 0.01))
    }

    fn external_inputs(&mut self, sequence: u64) -> ExternalInputs {
        let met = match self.objective_at {
            Some(at) => sequence >= at,
            None => self.target - self.quality < 0.005,
        };
        ExternalInputs {
            business_objective_met: met,
            ..ExternalInputs::default()
        }
        .with_extra("quality", self.quality)
    }
}
