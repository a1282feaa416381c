use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The caller-supplied external-constraints mapping for one cycle.
///
/// Fetched fresh at the top of every cycle and locked into the state chain
/// verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalInputs {
    /// The business objective this loop serves has been met.
    pub business_objective_met: bool,
    /// An operator asked the loop to stop.
    pub manual_stop: bool,
    /// Any further caller context to lock alongside the flags.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ExternalInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective_met() -> Self {
        Self {
            business_objective_met: true,
            ..Self::default()
        }
    }

    pub fn manual_stop() -> Self {
        Self {
            manual_stop: true,
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Non-negotiable, business-level constraints evaluated at each decision point.
///
/// Read-only to the decision engine. Any exhausted budget terminates the loop
/// regardless of what the internal signals say.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalConstraints {
    pub business_objective_met: bool,
    pub time_budget_seconds: f64,
    pub time_elapsed_seconds: f64,
    pub resource_budget_units: f64,
    pub resource_consumed_units: f64,
    pub max_cycles: u32,
    pub current_cycle: u32,
    pub manual_stop_requested: bool,
}

impl ExternalConstraints {
    /// Constraints with the given budgets and nothing consumed yet.
    pub fn with_budgets(time_budget_seconds: f64, resource_budget_units: f64, max_cycles: u32) -> Self {
        Self {
            business_objective_met: false,
            time_budget_seconds,
            time_elapsed_seconds: 0.0,
            resource_budget_units,
            resource_consumed_units: 0.0,
            max_cycles,
            current_cycle: 0,
            manual_stop_requested: false,
        }
    }

    pub fn time_remaining(&self) -> f64 {
        (self.time_budget_seconds - self.time_elapsed_seconds).max(0.0)
    }

    pub fn resource_remaining(&self) -> f64 {
        (self.resource_budget_units - self.resource_consumed_units).max(0.0)
    }

    pub fn time_exhausted(&self) -> bool {
        self.time_elapsed_seconds >= self.time_budget_seconds
    }

    pub fn resource_exhausted(&self) -> bool {
        self.resource_consumed_units >= self.resource_budget_units
    }

    pub fn max_cycles_reached(&self) -> bool {
        self.current_cycle >= self.max_cycles
    }
}

impl Default for ExternalConstraints {
    fn default() -> Self {
        Self::with_budgets(3600.0, 1000.0, 10)
    }
}
