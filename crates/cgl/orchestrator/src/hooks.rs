//! Caller-supplied collaborators for the loop.

use cgl_cost::{CycleBenefit, CycleCost};
use cgl_decision::CycleDecision;
use cgl_types::{CycleMetrics, ExternalInputs};
use serde_json::Value;
use thiserror::Error;

/// Whatever the work of a cycle produced.
pub type WorkOutput = Value;

/// A failed unit of work. The loop audits it and continues.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WorkError {
    pub message: String,
}

impl WorkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read-only view handed to the work of one cycle.
#[derive(Debug, Clone)]
pub struct CycleContext {
    cycle_id: String,
    sequence: u64,
    parameters: Value,
    metrics: CycleMetrics,
    assumptions_verified: bool,
    decision: CycleDecision,
}

impl CycleContext {
    pub fn new(
        cycle_id: impl Into<String>,
        sequence: u64,
        parameters: Value,
        metrics: CycleMetrics,
        assumptions_verified: bool,
        decision: CycleDecision,
    ) -> Self {
        Self {
            cycle_id: cycle_id.into(),
            sequence,
            parameters,
            metrics,
            assumptions_verified,
            decision,
        }
    }

    pub fn cycle_id(&self) -> &str {
        &self.cycle_id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Metrics the gates evaluated for this cycle.
    pub fn metrics(&self) -> &CycleMetrics {
        &self.metrics
    }

    pub fn assumptions_verified(&self) -> bool {
        self.assumptions_verified
    }

    /// Mode the work should run in (standard, adjusted or degraded).
    pub fn decision(&self) -> CycleDecision {
        self.decision
    }
}

/// The work and measurements the orchestrator delegates to its caller.
///
/// Only [`CycleHooks::execute`] is required; the rest default to neutral
/// values.
pub trait CycleHooks {
    fn execute(&mut self, ctx: &CycleContext) -> Result<WorkOutput, WorkError>;

    /// Metrics derived from the output of cycle `sequence`, evaluated by the
    /// gates at the start of the following cycle.
    fn metrics(&mut self, _sequence: u64, _output: &WorkOutput) -> CycleMetrics {
        CycleMetrics::baseline()
    }

    fn cost(&mut self, _sequence: u64, _output: &WorkOutput) -> CycleCost {
        CycleCost::default()
    }

    fn benefit(&mut self, _sequence: u64, _output: &WorkOutput) -> CycleBenefit {
        CycleBenefit::default()
    }

    /// Fresh external inputs for cycle `sequence`.
    fn external_inputs(&mut self, _sequence: u64) -> ExternalInputs {
        ExternalInputs::default()
    }
}

type ExecuteFn = Box<dyn FnMut(&CycleContext) -> Result<WorkOutput, WorkError>>;
type MeasureFn<T> = Box<dyn FnMut(u64, &WorkOutput) -> T>;
type InputsFn = Box<dyn FnMut(u64) -> ExternalInputs>;

/// [`CycleHooks`] assembled from closures.
pub struct FnHooks {
    execute: ExecuteFn,
    metrics: Option<MeasureFn<CycleMetrics>>,
    cost: Option<MeasureFn<CycleCost>>,
    benefit: Option<MeasureFn<CycleBenefit>>,
    external_inputs: Option<InputsFn>,
}

impl FnHooks {
    pub fn new(execute: impl FnMut(&CycleContext) -> Result<WorkOutput, WorkError> + 'static) -> Self {
        Self {
            execute: Box::new(execute),
            metrics: None,
            cost: None,
            benefit: None,
            external_inputs: None,
        }
    }

    pub fn with_metrics(mut self, f: impl FnMut(u64, &WorkOutput) -> CycleMetrics + 'static) -> Self {
        self.metrics = Some(Box::new(f));
        self
    }

    pub fn with_cost(mut self, f: impl FnMut(u64, &WorkOutput) -> CycleCost + 'static) -> Self {
        self.cost = Some(Box::new(f));
        self
    }

    pub fn with_benefit(mut self, f: impl FnMut(u64, &WorkOutput) -> CycleBenefit + 'static) -> Self {
        self.benefit = Some(Box::new(f));
        self
    }

    pub fn with_external_inputs(mut self, f: impl FnMut(u64) -> ExternalInputs + 'static) -> Self {
        self.external_inputs = Some(Box::new(f));
        self
    }
}

impl CycleHooks for FnHooks {
    fn execute(&mut self, ctx: &CycleContext) -> Result<WorkOutput, WorkError> {
        (self.execute)(ctx)
    }

    fn metrics(&mut self, sequence: u64, output: &WorkOutput) -> CycleMetrics {
        match self.metrics.as_mut() {
            Some(f) => f(sequence, output),
            None => CycleMetrics::baseline(),
        }
    }

    fn cost(&mut self, sequence: u64, output: &WorkOutput) -> CycleCost {
        match self.cost.as_mut() {
            Some(f) => f(sequence, output),
            None => CycleCost::default(),
        }
    }

    fn benefit(&mut self, sequence: u64, output: &WorkOutput) -> CycleBenefit {
        match self.benefit.as_mut() {
            Some(f) => f(sequence, output),
            None => CycleBenefit::default(),
        }
    }

    fn external_inputs(&mut self, sequence: u64) -> ExternalInputs {
        match self.external_inputs.as_mut() {
            Some(f) => f(sequence),
            None => ExternalInputs::default(),
        }
    }
}
