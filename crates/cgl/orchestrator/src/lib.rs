#![deny(unsafe_code)]
//! # cgl-orchestrator
//!
//! Drives the governance loop. Each cycle:
//!
//! 1. locks the cycle's inputs into the state chain
//! 2. runs the verification gates over the latest metrics
//! 3. asks the decision engine whether to continue
//! 4. executes the caller's work through [`CycleHooks`]
//! 5. records cost and benefit
//!
//! Every step is written to the audit trail. When the loop ends both chains
//! are verified and a [`TerminationReport`] is produced.
//!
//! ```no_run
//! use cgl_orchestrator::{CycleOrchestrator, FnHooks, OrchestratorConfig, RunPlan};
//! use cgl_types::ExternalInputs;
//! use serde_json::json;
//!
//! let mut orchestrator = CycleOrchestrator::new(OrchestratorConfig::default());
//! let mut hooks = FnHooks::new(|ctx| Ok(json!({"cycle": ctx.cycle_id()})))
//!     .with_external_inputs(|seq| {
//!         if seq == 3 { ExternalInputs::objective_met() } else { ExternalInputs::new() }
//!     });
//! let report = orchestrator.run(&RunPlan::new(json!({}), json!({})), &mut hooks).unwrap();
//! assert!(report.chains_intact());
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod orchestrator;
pub mod report;

pub use config::OrchestratorConfig;
pub use error::{OrchestratorError, OrchestratorResult};
pub use hooks::{CycleContext, CycleHooks, FnHooks, WorkError, WorkOutput};
pub use orchestrator::{CycleOrchestrator, RunPlan};
pub use report::{RunStatus, TerminationReport, REPORT_FILE};
