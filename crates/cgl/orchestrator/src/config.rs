//! Run configuration.

use crate::error::{OrchestratorError, OrchestratorResult};
use cgl_cost::CostConfig;
use cgl_decision::DecisionConfig;
use cgl_types::StorageError;
use cgl_verification::GateThresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Budgets, thresholds and storage for one orchestrated run.
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides:
///
/// ```toml
/// max_cycles = 20
/// storage_dir = "runs/latest"
///
/// [gates]
/// min_validation_rate = 0.9
///
/// [decision]
/// error_limit = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub max_cycles: u32,
    pub time_budget_seconds: f64,
    pub resource_budget_units: f64,
    /// Directory for `state_chain.json`, `audit_trail.json` and the report.
    /// `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
    /// Actor name stamped on audit events.
    pub actor: String,
    pub gates: GateThresholds,
    pub decision: DecisionConfig,
    pub cost: CostConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_cycles: 10,
            time_budget_seconds: 3600.0,
            resource_budget_units: 1000.0,
            storage_dir: None,
            actor: "orchestrator".into(),
            gates: GateThresholds::default(),
            decision: DecisionConfig::default(),
            cost: CostConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Tight gates and a short error fuse.
    pub fn strict() -> Self {
        Self {
            gates: GateThresholds::strict(),
            decision: DecisionConfig {
                error_limit: 2,
                ..DecisionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Loose gates and a longer error fuse, for exploratory runs.
    pub fn relaxed() -> Self {
        Self {
            gates: GateThresholds::relaxed(),
            decision: DecisionConfig {
                error_limit: 5,
                ..DecisionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> OrchestratorResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(StorageError::from)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> OrchestratorResult<Self> {
        toml::from_str(contents).map_err(|e| OrchestratorError::Config(e.to_string()))
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: u32) -> Self {
        self.max_cycles = max_cycles;
        self
    }
}
